use clap::{CommandFactory, Parser};
use taskrun::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["taskrun", "run", "start"],
        vec!["taskrun", "run", "start", "--", "--port", "8080"],
        vec!["taskrun", "run", "--dry-run", "start", "-x"],
        vec!["taskrun", "--workspace", "./ws", "run", "lint"],
        vec!["taskrun", "--workspace-file", "./ws/deno-workspace.json", "list"],
        vec!["taskrun", "list", "--format", "json"],
        vec!["taskrun", "validate"],
        vec!["taskrun", "--no-upgrade-check", "--log-level", "debug", "run", "a"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn passthrough_keeps_flags_after_script_name() {
    let cli = Cli::try_parse_from(["taskrun", "run", "serve", "--dry-run", "--workspace", "x"])
        .unwrap();
    match cli.command {
        Commands::Run {
            dry_run,
            script_and_args,
        } => {
            assert!(!dry_run);
            assert_eq!(script_and_args, vec!["serve", "--dry-run", "--workspace", "x"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["taskrun", "scan"]).is_err());
}

#[test]
fn top_level_help_lists_commands() {
    let mut command = Cli::command();
    let mut output = Vec::new();
    command.write_long_help(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    for token in ["run", "list", "validate", "--workspace", "--runtime"] {
        assert!(output.contains(token), "help should mention {token}");
    }
}
