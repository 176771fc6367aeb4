use clap::Parser;
use dbpager::cli::{Cli, Command};

fn dump_batches(args: &[&str]) -> Result<(usize, bool), clap::Error> {
    let cli = Cli::try_parse_from(args)?;
    match cli.command {
        Some(Command::Dump(dump)) => Ok((dump.batches, dump.all)),
        other => panic!("Expected dump, got {:?}", other),
    }
}

#[test]
fn test_dump_defaults_to_one_batch() {
    assert_eq!(dump_batches(&["dbpager", "dump", "users"]).unwrap(), (1, false));
}

#[test]
fn test_dump_batch_count() {
    assert_eq!(dump_batches(&["dbpager", "dump", "users", "-n", "3"]).unwrap(), (3, false));
}

#[test]
fn test_dump_zero_batches_rejected() {
    let err = dump_batches(&["dbpager", "dump", "users", "-n", "0"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_dump_batches_conflict_with_all() {
    let err = dump_batches(&["dbpager", "dump", "users", "-n", "2", "--all"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_no_subcommand_means_browse() {
    let cli = Cli::try_parse_from(["dbpager", "-d", "other.db"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.session.database.unwrap().to_str(), Some("other.db"));
}
