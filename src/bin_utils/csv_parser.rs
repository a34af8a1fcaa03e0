use std::io::Read;

use crate::{client::Money, command::OperationKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    pub op: OperationKind,
    pub client: Option<String>,
    pub balance: Option<Money>,
    pub amount: Option<Money>,
    pub notes: Option<String>,
}

/// Parses a scenario of operations in CSV format.
///
/// Rows that cannot be deserialized are yielded as errors, so the caller can
/// report them and carry on with the next row.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    /// Fails when the header row cannot be read.
    pub fn new(source: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        // headers are read lazily otherwise, and the first row would be reported at line 1
        reader.headers()?;

        Ok(Self {
            iter: reader.into_deserialize(),
        })
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
