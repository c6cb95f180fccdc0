//! Edge-list input source.
//!
//! The accepted format: the first non-blank line is the node count, every
//! following non-blank line is a `source,destination` pair of 1-based node
//! ids. Blank lines are skipped. The sort core never touches raw text; this
//! module hands it a node count and integer pairs.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

/// A parsed edge list: the node count plus `(source, destination)` pairs in
/// file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    /// Number of nodes; ids run `1..=num_nodes`.
    pub num_nodes: u32,
    /// Edges in input order. Duplicates are preserved.
    pub edges: Vec<(u32, u32)>,
}

/// Error reading or parsing an edge-list file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// Underlying I/O failure.
    #[error("failed to read edge list")]
    Io(#[from] io::Error),
    /// The input has no node-count line.
    #[error("missing node-count header line")]
    MissingHeader,
    /// A line did not parse as a count or a `source,destination` pair.
    #[error("line {line}: expected `source,destination`, got {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        text: String,
    },
    /// An edge references an id outside the declared node range.
    #[error("line {line}: node id {id} is outside 1..={num_nodes}")]
    IdOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending id.
        id: u32,
        /// Declared node count.
        num_nodes: u32,
    },
}

/// Reads and parses the edge list at `path`.
///
/// # Errors
///
/// See [`EdgeListError`].
pub fn read_edge_list(path: impl AsRef<Path>) -> Result<EdgeList, EdgeListError> {
    parse_edge_list(BufReader::new(File::open(path)?))
}

/// Parses an edge list from any buffered reader.
///
/// # Errors
///
/// See [`EdgeListError`].
pub fn parse_edge_list(reader: impl BufRead) -> Result<EdgeList, EdgeListError> {
    let mut num_nodes = None;
    let mut edges = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        match num_nodes {
            None => {
                num_nodes = Some(text.parse::<u32>().map_err(|_| EdgeListError::Malformed {
                    line: line_no,
                    text: text.to_owned(),
                })?);
            }
            Some(count) => {
                let (src, dst) = text.split_once(',').ok_or_else(|| EdgeListError::Malformed {
                    line: line_no,
                    text: text.to_owned(),
                })?;
                edges.push((parse_id(src, line_no, count)?, parse_id(dst, line_no, count)?));
            }
        }
    }
    let num_nodes = num_nodes.ok_or(EdgeListError::MissingHeader)?;
    Ok(EdgeList { num_nodes, edges })
}

fn parse_id(token: &str, line: usize, num_nodes: u32) -> Result<u32, EdgeListError> {
    let token = token.trim();
    let id = token.parse::<u32>().map_err(|_| EdgeListError::Malformed {
        line,
        text: token.to_owned(),
    })?;
    if id == 0 || id > num_nodes {
        return Err(EdgeListError::IdOutOfRange {
            line,
            id,
            num_nodes,
        });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_header_edges_and_blank_lines() {
        let input = "4\n\n1,2\n 2 , 3 \n3,4\n";
        let list = parse_edge_list(Cursor::new(input)).unwrap();
        assert_eq!(list.num_nodes, 4);
        assert_eq!(list.edges, vec![(1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn zero_nodes_and_no_edges_is_valid() {
        let list = parse_edge_list(Cursor::new("0\n")).unwrap();
        assert_eq!(list.num_nodes, 0);
        assert!(list.edges.is_empty());
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = parse_edge_list(Cursor::new("2\n1 2\n")).unwrap_err();
        assert!(matches!(err, EdgeListError::Malformed { line: 2, .. }));
    }

    #[test]
    fn rejects_out_of_range_id() {
        let err = parse_edge_list(Cursor::new("2\n1,3\n")).unwrap_err();
        assert!(matches!(
            err,
            EdgeListError::IdOutOfRange {
                line: 2,
                id: 3,
                num_nodes: 2
            }
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_edge_list(Cursor::new("")).unwrap_err();
        assert!(matches!(err, EdgeListError::MissingHeader));
    }
}
