extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
mod tests {
    lazy_static! {
        static ref EXPECTED_1000: String = create_expected(1000);
    }
    use super::*;

    fn create_expected(n_max: usize) -> String {
        let mut s = String::from("line,message\n");
        for i in 1..=n_max {
            s.push_str(&format!("{},{}\n", i, "0".repeat(i)));
        }
        s
    }

    fn zg(args: &[&str], dest: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin("zg")?;
        cmd.args(args).arg(dest);
        Ok(cmd)
    }

    fn gen_file(args: &[&str], n_max: &str) -> Result<String, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(args, &path)?.arg(n_max).assert().success();
        Ok(std::fs::read_to_string(&path)?)
    }

    #[test]
    fn three_rows() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(gen_file(&[], "3")?, "line,message\n1,0\n2,00\n3,000\n");
        Ok(())
    }

    #[test]
    fn one_row() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(gen_file(&[], "1")?, "line,message\n1,0\n");
        Ok(())
    }

    #[test]
    fn zero_rows_header_only() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(gen_file(&[], "0")?, "line,message\n");
        assert_eq!(gen_file(&["-F", "plain"], "0")?, "line,message\n");
        Ok(())
    }

    #[test]
    fn every_mode_same_bytes() -> Result<(), Box<dyn std::error::Error>> {
        for args in &[
            &[][..],
            &["-F", "plain"][..],
            &["-m"][..],
            &["-m", "-F", "plain", "-b", "100B"][..],
            &["-F", "csv", "-b", "1K", "--stats"][..],
        ] {
            let out = gen_file(args, "1000")?;
            assert_eq!(out.lines().count(), 1001, "args {:?}", args);
            assert!(out == *EXPECTED_1000, "args {:?} produced different output", args);
        }
        Ok(())
    }

    #[test]
    fn repeat_runs_identical() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        zg(&[], &a)?.arg("250").assert().success();
        zg(&[], &b)?.arg("250").assert().success();
        assert_eq!(std::fs::read(&a)?, std::fs::read(&b)?);
        Ok(())
    }

    #[test]
    fn read_back_with_csv_reader() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(&[], &path)?.arg("120").assert().success();

        let mut rdr = csv::Reader::from_path(&path)?;
        assert_eq!(rdr.headers()?.iter().collect::<Vec<_>>(), vec!["line", "message"]);
        let mut count = 0usize;
        for rec in rdr.records() {
            let rec = rec?;
            let line: usize = rec[0].parse()?;
            count += 1;
            assert_eq!(line, count);
            assert_eq!(rec[1].len(), line);
        }
        assert_eq!(count, 120);
        Ok(())
    }

    #[test]
    fn stats_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(&["--stats"], &path)?
            .arg("3")
            .assert()
            .success()
            .stderr(predicate::str::contains("rows: 3  size: 28 B"));
        Ok(())
    }

    #[test]
    fn bad_row_counts_write_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        for bad in &["abc", "-3", "2.5", ""] {
            zg(&[], &path)?.arg(bad).assert().failure();
            assert!(!path.exists(), "n_max {:?} must not create a file", bad);
        }
        Ok(())
    }

    #[test]
    fn missing_arguments() -> Result<(), Box<dyn std::error::Error>> {
        Command::cargo_bin("zg")?.assert().failure();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(&[], &path)?.assert().failure();
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn unopenable_destination() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing").join("out.csv");
        zg(&[], &path)?
            .arg("3")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("error: could not create"));
        Ok(())
    }

    #[test]
    fn directory_destination() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        zg(&[], dir.path())?
            .arg("3")
            .assert()
            .failure()
            .stderr(predicate::str::contains("is a directory"));
        Ok(())
    }

    #[test]
    fn materialize_too_many_rows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(&["-m"], &path)?
            .arg(usize::MAX.to_string())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("error: argument error: cannot hold"));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn verbose_dumps_options() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        zg(&["-v"], &path)?
            .arg("2")
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stderr(predicate::str::contains("CLI options"));
        zg(&[], &path)?
            .arg("2")
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stderr(predicate::str::contains("CLI options").not());
        Ok(())
    }
}
