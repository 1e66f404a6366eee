#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PARTNERS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<table>
    <column>
        <name>nombre</name>
        <type>character varying(100)</type>
        <null>NO</null>
    </column>
    <column>
        <name>Codigo</name>
        <type>character varying(10)</type>
    </column>
    <column>
        <name>cifnif</name>
        <type>character varying(30)</type>
        <default>'' &amp; 'x'</default>
    </column>
    <constraint>
        <name>partners_pkey</name>
        <type>PRIMARY KEY (codigo)</type>
    </constraint>
</table>
"#;

pub const SINGLE_COLUMN_XML: &str = r#"<table>
    <column>
        <name>id</name>
        <type>serial</type>
    </column>
</table>
"#;

/// Source and destination folders under one temporary root
pub struct BatchFixture {
    pub root: TempDir,
}

impl BatchFixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        fs::create_dir(root.path().join("src")).expect("create src dir");
        Self { root }
    }

    pub fn src(&self) -> PathBuf {
        self.root.path().join("src")
    }

    pub fn dst(&self) -> PathBuf {
        self.root.path().join("dst")
    }

    pub fn add_source(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.src().join(name);
        fs::write(&path, contents).expect("write source file");
        path
    }

    pub fn output(&self, name: &str) -> String {
        fs::read_to_string(self.dst().join(name)).expect("read output file")
    }

    pub fn output_names(&self) -> Vec<String> {
        list_names(&self.dst())
    }
}

pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Values of `<tag>` in document order
pub fn field_values(xml: &str, tag: &str) -> Vec<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    xml.match_indices(&open)
        .filter_map(|(start, _)| {
            let rest = &xml[start + open.len()..];
            rest.find(&close).map(|end| rest[..end].to_string())
        })
        .collect()
}
