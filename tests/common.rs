use assert_cmd::Command;
use std::fs;
use tempfile::{tempdir, TempDir};

/// Returns a configured Command for `dbimport`
pub fn dbimport_cmd() -> Command {
    Command::cargo_bin("dbimport").expect("Binary not found")
}

/// Prepares a temp dir holding `import.properties` with the given content
pub fn setup_properties(content: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("import.properties"), content)
        .expect("Failed to write properties file");
    temp_dir
}

#[allow(dead_code)]
pub const SALES_PROPERTIES: &str = "\
import.database.host=db1
import.database.name=salesdb
import.database.username=u
import.database.password=hunter2
import.database.ssl=TRUE
import.database.port=bad
";
