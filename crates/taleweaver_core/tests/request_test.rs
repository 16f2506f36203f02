use taleweaver_core::{GenerateRequest, GenerateResponse, Message, Role, SamplingParams};

#[test]
fn from_prompt_carries_sampling_params() {
    let request = GenerateRequest::from_prompt("Once upon a time", SamplingParams::new(500, 0.7));

    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, Role::User);
    assert_eq!(request.messages[0].content, "Once upon a time");
    assert_eq!(request.max_tokens, Some(500));
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.model, None);
}

#[test]
fn builder_sets_model_override() {
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Hi")])
        .model(Some("gpt-4o-mini".to_string()))
        .build()
        .unwrap();

    assert_eq!(request.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(request.max_tokens, None);
}

#[test]
fn response_text_joins_outputs() {
    let response = GenerateResponse {
        outputs: vec!["Once ".to_string(), "upon a time".to_string()],
        usage: None,
    };
    assert_eq!(response.text(), "Once upon a time");
    assert_eq!(GenerateResponse::default().text(), "");
}

#[test]
fn role_serializes_lowercase() {
    let json = serde_json::to_string(&Message::system("Be kind")).unwrap();
    assert!(json.contains("\"system\""));
}
