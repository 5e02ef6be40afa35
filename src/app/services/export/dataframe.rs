//! Conversion of data tables to Polars DataFrames

use crate::Result;
use crate::app::models::{DataTable, DataValue};
use crate::constants::DATA_COLUMN;
use polars::prelude::{Column, DataFrame};

/// String cell of the value column: missing is empty, not-a-number is null
fn value_cell(value: &DataValue) -> Option<&str> {
    match value {
        DataValue::Raw(raw) => Some(raw),
        DataValue::Missing => Some(""),
        DataValue::NotANumber => None,
    }
}

/// One String column per dimension plus the nullable `DATA` column
pub fn to_dataframe(table: &DataTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = table
        .dimension_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let members: Vec<&str> = table
                .rows
                .iter()
                .map(|row| row.members[index].as_str())
                .collect();
            Column::new(name.as_str().into(), members)
        })
        .collect();

    let values: Vec<Option<&str>> = table.values().map(value_cell).collect();
    columns.push(Column::new(DATA_COLUMN.into(), values));

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DataRow;

    fn sample_table() -> DataTable {
        DataTable {
            dimension_names: vec!["region".to_string(), "year".to_string()],
            rows: vec![
                DataRow {
                    members: vec!["North".to_string(), "2020".to_string()],
                    value: DataValue::Raw("12".to_string()),
                },
                DataRow {
                    members: vec!["North".to_string(), "2021".to_string()],
                    value: DataValue::Missing,
                },
                DataRow {
                    members: vec!["South".to_string(), "2020".to_string()],
                    value: DataValue::NotANumber,
                },
            ],
        }
    }

    #[test]
    fn test_dataframe_shape_and_nulls() {
        let df = to_dataframe(&sample_table()).unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(
            df.get_column_names_str(),
            vec!["region", "year", DATA_COLUMN]
        );

        let data = df.column(DATA_COLUMN).unwrap();
        assert_eq!(data.null_count(), 1);

        let values = data.str().unwrap();
        assert_eq!(values.get(0), Some("12"));
        assert_eq!(values.get(1), Some(""));
        assert_eq!(values.get(2), None);
    }

    #[test]
    fn test_dataframe_without_dimensions() {
        let table = DataTable {
            dimension_names: vec![],
            rows: vec![DataRow {
                members: vec![],
                value: DataValue::Raw("7".to_string()),
            }],
        };
        let df = to_dataframe(&table).unwrap();
        assert_eq!(df.shape(), (1, 1));
    }
}
