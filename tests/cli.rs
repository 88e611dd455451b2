#![cfg(feature = "cli")]

use std::fs::File;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

fn seq_search() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seq_search"))
}

#[test]
fn prints_report_and_exits_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.fasta");
    {
        let mut f = File::create(&path).unwrap();
        write!(f, ">alpha\nACGT\n>beta_1\nTTTT\n").unwrap();
    }
    let out = seq_search().arg(&path).arg("beta").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Found 1 sequence(s) containing 'beta':\n\n"));
    assert!(stdout.contains("Line number: 3\nSequence name: beta_1\nSequence data: TTTT\n"));
    assert!(!stdout.contains("Quality scores"));
}

#[test]
fn zero_matches_is_success() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.fa");
    {
        let mut f = File::create(&path).unwrap();
        write!(f, ">only_one\nACGT\n").unwrap();
    }
    let out = seq_search().arg(&path).arg("missing").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "No sequences found containing 'missing'\n"
    );
}

#[test]
fn unknown_format_exits_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    {
        let mut f = File::create(&path).unwrap();
        write!(f, "hello\n").unwrap();
    }
    let out = seq_search().arg(&path).arg("x").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Error: Cannot determine file type"));
}

#[test]
fn missing_file_exits_one() {
    let out = seq_search()
        .arg("/definitely/not/here.fq")
        .arg("x")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8(out.stderr).unwrap().contains("not found"));
}

#[test]
fn wrong_argument_count_exits_one() {
    let out = seq_search().arg("only_a_file.fa").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn fastq_quality_line_and_strategy_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reads.fq");
    {
        let mut f = File::create(&path).unwrap();
        write!(f, "@r1\nACGT\n+\nIIII\n@r2\nGGGG\n+\nHHHH\n").unwrap();
    }
    let out = seq_search()
        .arg(&path)
        .arg("r2")
        .args(["--strategy", "buffer"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Line number: 5\n"));
    assert!(stdout.contains("Quality scores: HHHH\n"));
}
