/*!
 * Full application lifecycle tests with a scripted provider
 */

use std::io::Cursor;

use flashgen::app_controller::GenerationRequest;
use flashgen::errors::ProviderError;
use flashgen::flashcards::Section;
use flashgen::providers::mock::MockProvider;
use flashgen::providers::ModelRequest;
use flashgen::shell::Shell;

use crate::common;

/// Answers base, batch and single-language prompts like a cooperative model
fn cooperative_model(request: &ModelRequest) -> String {
    let prompt = &request.prompt;
    if prompt.contains("Target languages:") {
        format!(
            "```json\n{{\"English\": {}, \"French\": {}, \"Romanian\": {}}}\n```",
            common::cards_reply(4, "En "),
            common::cards_reply(4, "Fr "),
            common::cards_reply(4, "Ro ")
        )
    } else if prompt.contains("Translate the following") {
        common::cards_reply(4, "Single ")
    } else {
        format!("Here are your cards:\n{}", common::cards_reply(4, "Term "))
    }
}

#[tokio::test]
async fn test_controllerRun_shouldRenderAndExportEveryLanguage() {
    common::init_test_logging();
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::new().with_responder(cooperative_model);
    let mut controller = common::mock_controller(&mock, temp.path());

    let mut request = GenerationRequest::from_config("Basic SQL Joins", controller.config());
    request.count = 4;
    request.section = Section::Example;

    let outcome = controller.run(&request).await.unwrap().unwrap();

    assert_eq!(mock.request_count(), 2);
    assert!(outcome.rendered.contains("English - 4 cards"));
    assert!(outcome.rendered.contains("French - 4 cards"));
    assert!(outcome.rendered.contains("Example: Fr example 1"));
    assert!(!outcome.rendered.contains("Fr definition 1"));
    assert_eq!(outcome.written.len(), 6);
    assert!(outcome
        .written
        .iter()
        .all(|p| p.file_name().unwrap().to_string_lossy().ends_with("_example.pdf")
            || p.file_name().unwrap().to_string_lossy().ends_with("_example.csv")));

    let set = controller.session().current().unwrap();
    assert_eq!(set.topic, "Basic SQL Joins");
    assert_eq!(set.decks.english()[0].term, "Term 1");
}

#[tokio::test]
async fn test_controllerRun_withEmptyBase_shouldKeepPreviousSession() {
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::scripted(["[]"]);
    let mut controller = common::mock_controller(&mock, temp.path());

    let request = GenerationRequest::from_config("Nothing", controller.config());
    let outcome = controller.run(&request).await.unwrap();

    assert!(outcome.is_none());
    assert!(!controller.session().has_cards());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_controllerRun_withBlankTopic_shouldFailBeforeAnyRequest() {
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::new().with_responder(cooperative_model);
    let mut controller = common::mock_controller(&mock, temp.path());

    let request = GenerationRequest::from_config("   ", controller.config());
    assert!(controller.run(&request).await.is_err());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_controllerGenerate_withFailingBase_shouldKeepPreviousSection() {
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::new().with_responder(cooperative_model);
    let mut controller = common::mock_controller(&mock, temp.path());

    let mut request = GenerationRequest::from_config("Basic SQL Joins", controller.config());
    request.count = 4;
    request.section = Section::Definition;
    assert!(controller.generate(&request).await.unwrap().is_some());

    mock.push_error(ProviderError::ConnectionError("offline".to_string()));
    request.section = Section::Example;
    assert!(controller.generate(&request).await.is_err());

    assert_eq!(controller.session().section(), Section::Definition);
    assert!(controller.session().has_cards());
}

#[tokio::test]
async fn test_shellSession_shouldGenerateSwitchSectionAndExport() {
    common::init_test_logging();
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::new().with_responder(cooperative_model);
    let mut shell = Shell::new(common::mock_controller(&mock, temp.path()));

    let script = "generate\n\
                  topic Basic SQL Joins\n\
                  count 4\n\
                  languages French\n\
                  pdf off\n\
                  generate\n\
                  section q&a\n\
                  export\n\
                  bogus\n\
                  quit\n\
                  show\n";
    let mut output = Vec::new();
    shell.run(Cursor::new(script), &mut output).await.unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Enter a topic first"));
    assert!(output.contains("French - 4 cards"));
    assert!(output.contains("Q: Fr question 1"));
    assert!(output.contains("unknown command 'bogus'"));
    assert_eq!(output.matches("_q&a.csv").count(), 2);
    assert!(!output.contains(".pdf"));

    // The batch reply holds Romanian too, but only French was requested
    let set = shell.controller().session().current().unwrap();
    assert_eq!(set.decks.languages().collect::<Vec<_>>(), vec!["English", "French"]);
    assert_eq!(shell.form().section, Section::QA);
}

#[tokio::test]
async fn test_shellSession_withFailingProvider_shouldReportAndContinue() {
    let temp = common::create_temp_dir().unwrap();
    let mock = MockProvider::failing();
    let mut shell = Shell::new(common::mock_controller(&mock, temp.path()));

    let mut output = Vec::new();
    shell
        .run(Cursor::new("topic Rust\ngenerate\nshow\n"), &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Generation failed"));
    assert!(output.contains("No flashcards yet"));
}
