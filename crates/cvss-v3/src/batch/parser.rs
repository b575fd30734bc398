use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct VectorRecord {
    pub(crate) id: Option<String>,
    pub(crate) vector: String,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<VectorRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<VectorRow>() {
        let row = record?;
        records.push(VectorRecord {
            id: row.id,
            vector: row.vector,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct VectorRow {
    #[serde(
        alias = "Id",
        alias = "ID",
        alias = "cve",
        alias = "CVE",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    id: Option<String>,
    #[serde(alias = "Vector", alias = "cvss_vector", alias = "CVSS Vector")]
    vector: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
