/*!
 * Tests for interactive shell command parsing
 */

use flashgen::flashcards::{Difficulty, Section};
use flashgen::providers::mock::MockProvider;
use flashgen::shell::{parse_command, Shell, ShellCommand};

use crate::common;

#[test]
fn test_parseCommand_formCommands_shouldParse() {
    assert_eq!(parse_command("difficulty Intermediate"), Ok(ShellCommand::Difficulty(Difficulty::Intermediate)));
    assert_eq!(parse_command("section example"), Ok(ShellCommand::Section(Section::Example)));
    assert_eq!(parse_command("temperature 0.25"), Ok(ShellCommand::Temperature(0.25)));
    assert_eq!(parse_command("csv on"), Ok(ShellCommand::Csv(true)));
    assert_eq!(parse_command("count 30"), Ok(ShellCommand::Count(30)));
}

#[test]
fn test_parseCommand_actions_shouldAcceptAliases() {
    assert_eq!(parse_command("run"), Ok(ShellCommand::Generate));
    assert_eq!(parse_command("EXIT"), Ok(ShellCommand::Quit));
    assert_eq!(parse_command("?"), Ok(ShellCommand::Help));
}

#[test]
fn test_parseCommand_withBadDifficulty_shouldExplain() {
    let err = parse_command("difficulty expert").unwrap_err();
    assert!(err.contains("beginner"));
}

#[test]
fn test_execute_settings_shouldDescribeDefaultForm() {
    let temp = common::create_temp_dir().unwrap();
    let mut shell = Shell::new(common::mock_controller(&MockProvider::new(), temp.path()));

    let mut output = Vec::new();
    tokio_test::block_on(shell.execute(ShellCommand::Settings, &mut output)).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("topic:       (none)"));
    assert!(text.contains("languages:   English, French, Romanian"));
    assert!(text.contains("section:     Definition"));
}

#[test]
fn test_execute_formCommands_shouldUpdateForm() {
    let temp = common::create_temp_dir().unwrap();
    let mut shell = Shell::new(common::mock_controller(&MockProvider::new(), temp.path()));

    let mut output = Vec::new();
    for line in ["topic Photosynthesis", "count 8", "difficulty advanced", "csv off", "section example"] {
        let command = parse_command(line).unwrap();
        tokio_test::block_on(shell.execute(command, &mut output)).unwrap();
    }

    let form = shell.form();
    assert_eq!(form.topic, "Photosynthesis");
    assert_eq!(form.count, 8);
    assert_eq!(form.difficulty, Difficulty::Advanced);
    assert!(!form.export_csv);
    assert_eq!(form.section, Section::Example);
    assert_eq!(shell.controller().session().section(), Section::Example);
}

#[test]
fn test_execute_check_shouldReportProviderReachability() {
    let temp = common::create_temp_dir().unwrap();
    assert_eq!(parse_command("check"), Ok(ShellCommand::Check));

    let mut shell = Shell::new(common::mock_controller(&MockProvider::new(), temp.path()));
    let mut output = Vec::new();
    tokio_test::block_on(shell.execute(ShellCommand::Check, &mut output)).unwrap();
    assert!(String::from_utf8(output).unwrap().contains("Mock is reachable."));

    let mut shell = Shell::new(common::mock_controller(&MockProvider::failing(), temp.path()));
    let mut output = Vec::new();
    tokio_test::block_on(shell.execute(ShellCommand::Check, &mut output)).unwrap();
    assert!(String::from_utf8(output).unwrap().contains("Connection check failed"));
}
