//! Prompts and response schemas for each assistant operation.

use serde_json::{Value, json};

use crate::image::ImageInput;
use crate::types::{Content, GenerateRequest, GenerationConfig, InlineData, Part, Tool};

const IMAGE_PROMPT: &str = "Analyze this website mockup or business-related image. Extract or generate a suitable business name, a hero headline, a professional 'About Us' description, and a list of at least 3 products or services mentioned or suggested by the image. Return the result in JSON format.";

/// Schema of a copy suggestion; `with_business_name` also asks for the name
pub(crate) fn suggestion_schema(with_business_name: bool) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    if with_business_name {
        properties.insert("businessName".to_string(), json!({ "type": "STRING" }));
        required.push("businessName");
    }
    properties.insert("headline".to_string(), json!({ "type": "STRING" }));
    properties.insert("aboutText".to_string(), json!({ "type": "STRING" }));
    properties.insert(
        "productDescriptions".to_string(),
        json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
    );
    required.extend(["headline", "aboutText", "productDescriptions"]);

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn json_output(with_business_name: bool) -> Option<GenerationConfig> {
    Some(GenerationConfig {
        response_mime_type: "application/json".to_string(),
        response_schema: suggestion_schema(with_business_name),
    })
}

fn text_content(text: String) -> Vec<Content> {
    vec![Content {
        parts: vec![Part::Text { text }],
    }]
}

pub(crate) fn improve_request(text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: text_content(format!(
            "Improve the following website copy to be more professional and persuasive: \"{}\"",
            text
        )),
        generation_config: None,
        tools: Vec::new(),
    }
}

pub(crate) fn enhance_request(description: &str, business_name: &str) -> GenerateRequest {
    let prompt = format!(
        "Generate professional website copy for a business named \"{}\".\n\
         Description: {}.\n\
         Return a punchy headline, a 2-paragraph \"About Us\" section, and 3 hypothetical product descriptions.",
        business_name, description
    );
    GenerateRequest {
        contents: text_content(prompt),
        generation_config: json_output(false),
        tools: Vec::new(),
    }
}

pub(crate) fn image_request(image: &ImageInput) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
                Part::Text {
                    text: IMAGE_PROMPT.to_string(),
                },
            ],
        }],
        generation_config: json_output(true),
        tools: Vec::new(),
    }
}

pub(crate) fn url_request(url: &str) -> GenerateRequest {
    let prompt = format!(
        "Analyze this business website URL: {}. Using your search capabilities, find information about the site and extract:\n\
         1. The official Business Name\n\
         2. A professional hero headline\n\
         3. A compelling \"About Us\" story (2 paragraphs)\n\
         4. A list of 3-5 main products or services offered.\n\
         Return the result in strictly valid JSON format.",
        url
    );
    GenerateRequest {
        contents: text_content(prompt),
        generation_config: json_output(true),
        tools: vec![Tool {
            google_search: serde_json::Map::new(),
        }],
    }
}
