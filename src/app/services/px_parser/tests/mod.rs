//! Test fixtures for PX parser testing
//!
//! Sample documents shared by the sectioning, dictionary and parser tests.

mod dictionary_tests;
mod parser_tests;
mod sections_tests;

/// Two dimensions of two members each, values 1..4
pub fn create_simple_px() -> String {
    r#"CHARSET="ANSI";
TITLE="Simple table";
STUB="A";
HEADING="B";
VALUES("A")="x","y";
VALUES("B")="p","q";
DATA=
1 2
3 4;"#
        .to_string()
}

/// Census-style document with codes, recodable cells and Windows line endings
pub fn create_census_px() -> String {
    [
        r#"AXIS-VERSION="2010";"#,
        r#"DECIMALS=0;"#,
        r#"TITLE="Resident population by sex, age","#,
        r#""and year";"#,
        r#"STUB="sex","age group";"#,
        r#"HEADING="year";"#,
        r#"VALUES("sex")="Men","Women";"#,
        r#"VALUES("age group")="0-14","15-64","65+";"#,
        r#"VALUES("year")="2020","2021";"#,
        r#"CODES("sex")="1","2";"#,
        r#"UNITS="persons";"#,
        r#"DATA="#,
        r#"100 110 200 210 ".." 310"#,
        r#"101 111 "." 211 301 311;"#,
    ]
    .join("\r\n")
}

/// Document whose token count does not match its dimensions
pub fn create_misaligned_px() -> String {
    r#"STUB="A";HEADING="B";VALUES("A")="x","y";VALUES("B")="p","q";DATA=1 2 3;"#.to_string()
}
