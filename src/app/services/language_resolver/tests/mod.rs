//! Test fixtures for multilingual resolution
//!
//! The fixture is a German/French/Italian document where dimension names are
//! translated too, so `VALUES(..)` keys differ per language.

use crate::app::models::MetadataDictionary;
use crate::app::services::px_parser::{dictionary, sections};


pub fn create_multilingual_px() -> String {
    r#"CHARSET="ANSI";
LANGUAGE="de";
LANGUAGES="de","fr","it";
TITLE="Bevölkerung nach Geschlecht";
TITLE[fr]="Population selon le sexe";
TITLE[it]="Popolazione per sesso";
STUB="Geschlecht";
STUB[fr]="Sexe";
STUB[it]="Sesso";
HEADING="Jahr";
HEADING[fr]="Année";
HEADING[it]="Anno";
VALUES("Geschlecht")="Mann","Frau";
VALUES("Sexe")[fr]="Homme","Femme";
VALUES("Sesso")[it]="Uomo","Donna";
VALUES("Jahr")="2020","2021";
VALUES("Année")[fr]="2020","2021";
VALUES("Anno")[it]="2020","2021";
UNITS="Personen";
DATA=
10 11
20 21;"#
        .to_string()
}

pub fn languages() -> Vec<String> {
    ["de", "fr", "it"].iter().map(|l| l.to_string()).collect()
}

/// Raw dictionary of a PX document
pub fn dictionary_of(text: &str) -> MetadataDictionary {
    let sections = sections::extract(text).unwrap();
    dictionary::build(&sections.attributes).unwrap()
}
