use anyhow::{anyhow, Result};
use enum_dispatch::enum_dispatch;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::Cursor;
use std::io::Write;

/// Utility function to convert from polars `AnyValue` to `serde_json::Value`.
/// Doesn't cover all types but the ones the unified dataset uses.
fn any_value_to_json(value: &AnyValue) -> Result<Value> {
    match value {
        AnyValue::Null => Ok(Value::Null),
        AnyValue::Boolean(b) => Ok(Value::Bool(*b)),
        AnyValue::String(s) => Ok(Value::String((*s).to_string())),
        AnyValue::Int32(n) => Ok(json!(*n)),
        AnyValue::Int64(n) => Ok(json!(*n)),
        AnyValue::Float64(n) => Ok(json!(*n)),
        AnyValue::Date(_) => Ok(json!(value.to_string())),
        _ => Err(anyhow!("Failed to convert type")),
    }
}

/// Trait to define different output generators. Defines two functions,
/// `save` which writes a serialized form of the `DataFrame` and `format`
/// which returns it as a string.
#[enum_dispatch]
pub trait OutputGenerator {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()>;
    fn format(&self, df: &mut DataFrame) -> Result<String> {
        let mut data: Vec<u8> = vec![];
        let mut buff = Cursor::new(&mut data);
        self.save(&mut buff, df)?;

        Ok(String::from_utf8(data)?)
    }
}

/// Enum of OutputFormatters one for each potential output type
#[enum_dispatch(OutputGenerator)]
#[derive(Serialize, Deserialize, Debug)]
pub enum OutputFormatter {
    Csv(CSVFormatter),
    Json(JSONFormatter),
}

/// Format the results as a CSV file
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CSVFormatter;

impl OutputGenerator for CSVFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        CsvWriter::new(writer).finish(df)?;
        Ok(())
    }
}

/// Format the results as a JSON array with one object per row
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JSONFormatter;

impl OutputGenerator for JSONFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        let mut records: Vec<Value> = vec![];
        for idx in 0..df.height() {
            let mut record = serde_json::Map::new();
            for column in df.get_columns() {
                let val = any_value_to_json(&column.get(idx)?)?;
                record.insert(column.name().to_string(), val);
            }
            records.push(Value::Object(record));
        }
        writer.write_all(serde_json::to_string(&records)?.as_bytes())?;
        Ok(())
    }
}
