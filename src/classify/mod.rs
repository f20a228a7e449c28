//! Stream I/O layer for read classification
//!
//! Thin, replaceable collaborators around the engine: parse an edge stream
//! into a [`TreeBuilder`], group contiguous query rows by read identifier,
//! fold each group through the engine and write `read_id<TAB>lca` lines.
//! Query-time failures skip the offending read; everything structural
//! aborts the pass.

use std::io::{BufRead, Lines, Write};

use anyhow::Result;
use tracing::{debug, warn};

use crate::lca::LcaEngine;
use crate::tree::TreeBuilder;
use crate::LcaError;

/// One parsed query row: `read_id taxon_id kmer_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Read identifier; rows for one read appear contiguously.
    pub read_id: String,
    /// Taxon hit for one k-mer of the read.
    pub taxon: String,
    /// Number of k-mers supporting the hit. Validated but unused by the
    /// LCA reduction itself.
    pub kmer_count: u64,
}

impl QueryRecord {
    fn parse(line: &str, line_no: usize) -> Result<Self, LcaError> {
        let malformed = |reason: String| LcaError::MalformedInput {
            line: line_no,
            reason,
        };
        let mut fields = line.split_whitespace();
        let read_id = fields
            .next()
            .ok_or_else(|| malformed("missing read id".to_string()))?;
        let taxon = fields
            .next()
            .ok_or_else(|| malformed("missing taxon id".to_string()))?;
        let count = fields
            .next()
            .ok_or_else(|| malformed("missing k-mer count".to_string()))?;
        let kmer_count = count
            .parse()
            .map_err(|_| malformed(format!("invalid k-mer count '{count}'")))?;
        if fields.next().is_some() {
            return Err(malformed(
                "expected exactly 3 fields: read_id taxon_id kmer_count".to_string(),
            ));
        }
        Ok(Self {
            read_id: read_id.to_string(),
            taxon: taxon.to_string(),
            kmer_count,
        })
    }
}

/// A contiguous run of query rows sharing one read identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryGroup {
    /// The shared read identifier.
    pub read_id: String,
    /// Taxon hits in row order.
    pub taxa: Vec<String>,
}

/// Iterator yielding [`QueryGroup`]s from a query stream.
///
/// Rows for the same read must be contiguous; a read id reappearing after
/// an intervening read starts a fresh group, exactly as the classifier it
/// feeds would emit a second output line.
#[derive(Debug)]
pub struct QueryGroups<R> {
    lines: Lines<R>,
    pending: Option<QueryRecord>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> QueryGroups<R> {
    /// Wrap a buffered query stream.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
            line_no: 0,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Option<Result<QueryRecord>> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            match line {
                Err(err) => return Some(Err(err.into())),
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(
                        QueryRecord::parse(&line, self.line_no).map_err(Into::into),
                    );
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for QueryGroups<R> {
    type Item = Result<QueryGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let first = match self.pending.take() {
            Some(record) => record,
            None => match self.next_record()? {
                Ok(record) => record,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            },
        };
        let mut group = QueryGroup {
            read_id: first.read_id,
            taxa: vec![first.taxon],
        };
        loop {
            match self.next_record() {
                None => break,
                Some(Err(err)) => {
                    self.failed = true;
                    return Some(Err(err));
                }
                Some(Ok(record)) => {
                    if record.read_id == group.read_id {
                        group.taxa.push(record.taxon);
                    } else {
                        self.pending = Some(record);
                        break;
                    }
                }
            }
        }
        Some(Ok(group))
    }
}

/// Parse a `father son` edge stream into a [`TreeBuilder`].
///
/// Blank lines are skipped; any other deviation from two whitespace-
/// separated fields is rejected with a line-numbered
/// [`LcaError::MalformedInput`].
pub fn read_tree<R: BufRead>(reader: R) -> Result<TreeBuilder<String>> {
    let mut builder = TreeBuilder::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let father = fields.next().ok_or_else(|| LcaError::MalformedInput {
            line: line_no,
            reason: "missing father vertex".to_string(),
        })?;
        let son = fields.next().ok_or_else(|| LcaError::MalformedInput {
            line: line_no,
            reason: "missing son vertex".to_string(),
        })?;
        if fields.next().is_some() {
            return Err(LcaError::MalformedInput {
                line: line_no,
                reason: "expected exactly 2 fields: father son".to_string(),
            }
            .into());
        }
        builder.add_edge(&father.to_string(), &son.to_string())?;
    }
    debug!(vertices = builder.len(), "edge stream parsed");
    Ok(builder)
}

/// Outcome counters for one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifySummary {
    /// Reads that produced an output line.
    pub reads_classified: usize,
    /// Reads skipped because a query-time error hit one of their taxa.
    pub reads_skipped: usize,
}

/// Fold every query group through `engine` and write one
/// `read_id<TAB>lca_taxon` line per read, in input order.
///
/// [`LcaError::UnknownVertex`] and [`LcaError::VertexUnreachable`] are
/// per-read failures: the read is skipped with a warning and counted in
/// the summary. Parse and I/O errors abort the pass.
pub fn classify_reads<R: BufRead, W: Write>(
    engine: &LcaEngine<String>,
    queries: R,
    out: &mut W,
) -> Result<ClassifySummary> {
    let mut summary = ClassifySummary::default();
    for group in QueryGroups::new(queries) {
        let group = group?;
        match engine.fold_lca(&group.taxa) {
            Ok(lca) => {
                writeln!(out, "{}\t{}", group.read_id, lca)?;
                summary.reads_classified += 1;
            }
            Err(err @ (LcaError::UnknownVertex(_) | LcaError::VertexUnreachable(_))) => {
                warn!(read = %group.read_id, %err, "skipping unclassifiable read");
                summary.reads_skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    debug!(
        classified = summary.reads_classified,
        skipped = summary.reads_skipped,
        "classification pass complete"
    );
    Ok(summary)
}
