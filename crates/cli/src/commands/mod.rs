pub mod assist;
pub mod build;
pub mod embed;
pub mod export;
pub mod init;
pub mod preview;
pub mod product;
pub mod set;
pub mod site;
pub mod template;
pub mod validate;
