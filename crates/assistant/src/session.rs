//! Running assistant requests against an editing session.

use instapage_core::{
    CopyField, Editor, PreviewRenderer, Product, WebsiteDataPatch,
};

use crate::CopyAssistant;
use crate::error::{AssistError, Result};
use crate::types::ContentSuggestions;

/// Rewrite one copy field with the assistant
///
/// Returns `Ok(false)` without calling the assistant when the field is blank.
/// The editor's busy flag is held for the duration of the request and is
/// cleared whether or not it succeeds. Nothing is retried.
pub async fn improve_field<R, A>(
    editor: &mut Editor<R>,
    field: &CopyField,
    assistant: &A,
) -> Result<bool>
where
    R: PreviewRenderer,
    A: CopyAssistant + ?Sized,
{
    let current = match field.read(editor.data()) {
        Some(text) => text.to_string(),
        None => return Err(missing_product(field)),
    };
    if current.trim().is_empty() {
        return Ok(false);
    }

    editor.begin_assist()?;
    let result = assistant.improve_copy(&current).await;
    editor.finish_assist();

    editor.set_copy(field, result?)?;
    Ok(true)
}

fn missing_product(field: &CopyField) -> AssistError {
    let id = match field {
        CopyField::ProductDescription(id) => id.clone(),
        _ => String::new(),
    };
    instapage_core::Error::ProductNotFound(id).into()
}

/// Merge assistant suggestions into the site as one change
///
/// Blank suggestions leave the current values alone. Product descriptions
/// are assigned to the existing products in order; descriptions beyond the
/// last product become new placeholder products. Returns the new revision.
pub fn apply_suggestions<R: PreviewRenderer>(
    editor: &mut Editor<R>,
    suggestions: &ContentSuggestions,
) -> u64 {
    let non_blank = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());

    let mut patch = WebsiteDataPatch {
        about_headline: non_blank(&suggestions.headline),
        about_text: non_blank(&suggestions.about_text),
        business_name: suggestions.business_name.as_deref().and_then(non_blank),
        ..Default::default()
    };

    if !suggestions.product_descriptions.is_empty() {
        let mut products = editor.data().products.clone();
        for (i, description) in suggestions.product_descriptions.iter().enumerate() {
            match products.get_mut(i) {
                Some(product) => product.description = description.clone(),
                None => products.push(Product {
                    description: description.clone(),
                    ..Product::placeholder()
                }),
            }
        }
        patch.products = Some(products);
    }

    tracing::info!(
        headline = patch.about_headline.is_some(),
        about = patch.about_text.is_some(),
        products = suggestions.product_descriptions.len(),
        "applying assistant suggestions"
    );

    editor.apply(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageInput;
    use async_trait::async_trait;
    use instapage_core::WebsiteData;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NameRenderer;

    impl PreviewRenderer for NameRenderer {
        fn render(&self, data: &WebsiteData) -> String {
            format!("<h1>{}</h1>", data.business_name)
        }
    }

    /// Assistant that upper-cases text, or fails when told to
    #[derive(Default)]
    struct ShoutingAssistant {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CopyAssistant for ShoutingAssistant {
        async fn improve_copy(&self, text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AssistError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                });
            }
            Ok(text.to_uppercase())
        }

        async fn enhance_content(&self, _: &str, _: &str) -> Result<ContentSuggestions> {
            Ok(ContentSuggestions::default())
        }

        async fn analyze_image(&self, _: &ImageInput) -> Result<ContentSuggestions> {
            Ok(ContentSuggestions::default())
        }

        async fn analyze_url(&self, _: &str) -> Result<ContentSuggestions> {
            Ok(ContentSuggestions::default())
        }
    }

    fn editor() -> Editor<NameRenderer> {
        Editor::new(WebsiteData::starter(), NameRenderer)
    }

    #[tokio::test]
    async fn test_improve_field_applies_text() {
        let mut editor = editor();
        let assistant = ShoutingAssistant::default();

        let changed = improve_field(&mut editor, &CopyField::BusinessName, &assistant)
            .await
            .unwrap();

        assert!(changed);
        assert_eq!(editor.data().business_name, "BUSINESS NAME");
        assert_eq!(editor.preview(), "<h1>BUSINESS NAME</h1>");
        assert!(!editor.is_assist_busy());
    }

    #[tokio::test]
    async fn test_improve_product_description() {
        let mut editor = editor();
        let assistant = ShoutingAssistant::default();
        let field = CopyField::ProductDescription("2".to_string());

        improve_field(&mut editor, &field, &assistant).await.unwrap();
        assert_eq!(
            editor.data().product("2").unwrap().description,
            "JOIN A COMMUNITY OF LIKE-MINDED HIGH-ACHIEVERS."
        );

        let missing = CopyField::ProductDescription("nope".to_string());
        let err = improve_field(&mut editor, &missing, &assistant).await.unwrap_err();
        assert!(matches!(
            err,
            AssistError::Editor(instapage_core::Error::ProductNotFound(ref id)) if id == "nope"
        ));
    }

    #[tokio::test]
    async fn test_blank_field_is_not_sent() {
        let mut editor = editor();
        editor.set_copy(&CopyField::Title, "  ".to_string()).unwrap();
        let assistant = ShoutingAssistant::default();

        let changed = improve_field(&mut editor, &CopyField::Title, &assistant).await.unwrap();

        assert!(!changed);
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_clears_busy_and_keeps_text() {
        let mut editor = editor();
        let before = editor.data().about_text.clone();
        let revision = editor.revision();
        let assistant = ShoutingAssistant {
            fail: true,
            ..Default::default()
        };

        let err = improve_field(&mut editor, &CopyField::About, &assistant).await.unwrap_err();

        assert!(matches!(err, AssistError::Api { status: 503, .. }));
        assert!(!editor.is_assist_busy());
        assert_eq!(editor.data().about_text, before);
        assert_eq!(editor.revision(), revision);
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_busy_editor_rejects_second_request() {
        let mut editor = editor();
        editor.begin_assist().unwrap();
        let assistant = ShoutingAssistant::default();

        let err = improve_field(&mut editor, &CopyField::Headline, &assistant)
            .await
            .unwrap_err();

        assert!(err.is_busy());
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 0);
        // The first request still owns the flag
        assert!(editor.is_assist_busy());
    }

    #[test]
    fn test_apply_suggestions_merges_and_appends() {
        let mut editor = editor();
        let revision = editor.revision();
        let suggestions = ContentSuggestions {
            headline: "Grow Every Day".to_string(),
            about_text: String::new(),
            product_descriptions: vec![
                "First".to_string(),
                "Second".to_string(),
                "Third".to_string(),
            ],
            business_name: Some("Bright Path Coaching".to_string()),
            source_urls: Vec::new(),
        };
        let about_before = editor.data().about_text.clone();

        let new_revision = apply_suggestions(&mut editor, &suggestions);

        assert_eq!(new_revision, revision + 1);
        let data = editor.data();
        assert_eq!(data.about_headline, "Grow Every Day");
        assert_eq!(data.about_text, about_before);
        assert_eq!(data.business_name, "Bright Path Coaching");
        assert_eq!(data.products.len(), 3);
        assert_eq!(data.products[0].id, "1");
        assert_eq!(data.products[0].description, "First");
        assert_eq!(data.products[1].name, "Mastermind Group");
        assert_eq!(data.products[1].description, "Second");
        assert_eq!(data.products[2].name, "New Product");
        assert_eq!(data.products[2].description, "Third");
        assert_eq!(editor.preview(), "<h1>Bright Path Coaching</h1>");
    }

    #[test]
    fn test_empty_suggestions_change_nothing() {
        let mut editor = editor();
        let before = editor.data().clone();
        apply_suggestions(&mut editor, &ContentSuggestions::default());
        assert_eq!(editor.data(), &before);
    }
}
