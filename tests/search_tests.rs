//! End-to-end tests of the `oligo-solver` binary.

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const CORPUS_FASTA: &str = ">m1\nACGTAC\n>m2\nACGTAG\n>m3\nTTGTAC\n>m4\nACGAAC\n>m5\nGGGGGG\n";

fn fasta_file(content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
    temp.write_all(content.as_bytes()).unwrap();
    temp.flush().unwrap();
    temp
}

fn search(queries: &Path, corpus: &Path) -> Command {
    let mut cmd = Command::cargo_bin("oligo-solver").unwrap();
    cmd.arg("search")
        .arg(queries)
        .arg(corpus)
        .args(["--flanking-size", "1", "-k", "1", "-n", "5", "--shards", "2", "-t", "2"]);
    cmd
}

#[test]
fn test_search_csv_ranking() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");

    search(queries.path(), corpus.path())
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(
            "Query_ID,Degenerate_Pattern,Ambiguous_Positions,Match_Count,Percent_Hit\n\
             q1,ACG.AC,4,2,40.00\n\
             q1,A.GTAC,2,1,20.00\n\
             q1,AC.TAC,3,1,20.00\n\
             q1,ACGT.C,5,1,20.00\n",
        )
        .stderr(predicate::str::contains("1 completed, 0 skipped"));
}

#[test]
fn test_search_json_output() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n>q2\nGGGGGG\n");

    let output = search(queries.path(), corpus.path())
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["completed"], 2);
    assert_eq!(json["corpus"]["sequences"], 5);
    assert_eq!(json["corpus"]["sequence_length"], 6);
    assert_eq!(json["parameters"]["num_ambiguities"], 1);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0]["query_id"], "q1");
    assert_eq!(results[0]["pattern"], "ACG.AC");
    assert_eq!(results[0]["count"], 2);
    assert_eq!(results[4]["query_id"], "q2");
    assert_eq!(results[4]["count"], 1);
}

#[test]
fn test_search_writes_output_file() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results.tsv");

    search(queries.path(), corpus.path())
        .args(["-f", "tsv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "q1\tACG.AC\t4\t2\t40.00");
}

#[test]
fn test_search_config_file() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");
    let mut config = NamedTempFile::with_suffix(".json").unwrap();
    config
        .write_all(br#"{"flanking_size": 1, "num_ambiguities": 1, "top_n": 1}"#)
        .unwrap();
    config.flush().unwrap();

    Command::cargo_bin("oligo-solver")
        .unwrap()
        .args(["-f", "csv", "search"])
        .arg(queries.path())
        .arg(corpus.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("q1,ACG.AC,4,2,40.00"))
        .stdout(predicate::str::contains("A.GTAC").not());
}

#[test]
fn test_search_reports_skipped_and_failed_queries() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">ok\nACGTAC\n>short\nAC\n>long\nACGTACGT\n");

    search(queries.path(), corpus.path())
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok,ACG.AC"))
        .stdout(predicate::str::contains("long").not())
        .stderr(predicate::str::contains("1 completed, 1 skipped"))
        .stderr(predicate::str::contains("1 failed"))
        .stderr(predicate::str::contains("long"));
}

#[test]
fn test_search_drops_mismatched_corpus_lengths() {
    let corpus = fasta_file(&format!("{CORPUS_FASTA}>odd\nACGTA\n"));
    let queries = fasta_file(">q1\nACGTAC\n");

    search(queries.path(), corpus.path())
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q1,ACG.AC,4,2,40.00"))
        .stderr(predicate::str::contains("Dropped 1 corpus sequence"));
}

#[test]
fn test_search_empty_corpus_is_fatal() {
    let corpus = fasta_file("");
    let queries = fasta_file(">q1\nACGTAC\n");

    search(queries.path(), corpus.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequences found"));
}

#[test]
fn test_search_unwritable_output_is_fatal() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");

    search(queries.path(), corpus.path())
        .args(["-o", "/nonexistent-dir/results.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot create output file"));
}

#[test]
fn test_failed_search_keeps_existing_output() {
    let corpus = fasta_file("");
    let queries = fasta_file(">q1\nACGTAC\n");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results.csv");
    std::fs::write(&out, "previous results\n").unwrap();

    search(queries.path(), corpus.path())
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous results\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_search_overwrites_existing_output_on_success() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results.csv");
    std::fs::write(&out, "previous results\n").unwrap();

    search(queries.path(), corpus.path())
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("Query_ID,"));
    assert!(!written.contains("previous results"));
}

#[test]
fn test_search_zero_shards_is_fatal() {
    let corpus = fasta_file(CORPUS_FASTA);
    let queries = fasta_file(">q1\nACGTAC\n");

    Command::cargo_bin("oligo-solver")
        .unwrap()
        .arg("search")
        .arg(queries.path())
        .arg(corpus.path())
        .args(["--shards", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No compute units available"));
}

#[test]
fn test_count_patterns() {
    let corpus = fasta_file(CORPUS_FASTA);

    Command::cargo_bin("oligo-solver")
        .unwrap()
        .arg("count")
        .arg(corpus.path())
        .args(["ACG.AC", "nngtac", "......"])
        .assert()
        .success()
        .stdout("ACG.AC\t2\t40.00%\nNNGTAC\t2\t40.00%\n......\t5\t100.00%\n");
}

#[test]
fn test_count_length_mismatch_is_fatal() {
    let corpus = fasta_file(CORPUS_FASTA);

    Command::cargo_bin("oligo-solver")
        .unwrap()
        .arg("count")
        .arg(corpus.path())
        .arg("ACGT")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match corpus sequence length"));
}
