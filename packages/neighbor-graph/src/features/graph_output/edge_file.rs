//! Edge-list text format
//!
//! One edge per line, tab separated, no header:
//!
//! ```text
//! <node1>\t<node2>\t<weight>
//! ```
//!
//! Node indices are 1-based. Count weights are written as integers, Jaccard
//! weights with Rust's shortest round-trip float formatting, so reading a file
//! back yields the identical edge set.

use crate::errors::{GraphError, Result};
use crate::shared::{Edge, EdgeList, WeightKind};
use std::collections::HashSet;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Write edges in the text format
pub fn write_edges<W: Write>(writer: W, edges: &EdgeList) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for e in edges {
        let weight = match edges.kind() {
            WeightKind::Count => (e.weight as u64).to_string(),
            WeightKind::Jaccard => e.weight.to_string(),
        };
        out.write_record([
            (e.source + 1).to_string(),
            (e.target + 1).to_string(),
            weight,
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Write edges to `path` atomically
///
/// The rows go to a temporary file next to `path`, which is renamed over the
/// target only after a successful flush and sync.
pub fn write_edge_file(path: &Path, edges: &EdgeList) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    write_edges(temp.as_file_mut(), edges)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Parse edges from the text format
///
/// Blank lines are skipped. Pairs are canonicalized; self-loops, zero
/// indices, repeated pairs and weights outside the range of `kind` are
/// rejected: counts must be 1 or 2, Jaccard values in (0, 1].
pub fn read_edges<R: Read>(reader: R, kind: WeightKind) -> Result<EdgeList> {
    let mut rows = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut edges = Vec::new();
    let mut seen = HashSet::new();

    for record in rows.records() {
        let record = record?;
        let line_no = record.position().map_or(0, |p| p.line() as usize);
        if record.len() != 3 {
            return Err(GraphError::parse(
                line_no,
                format!("expected 3 columns, found {}", record.len()),
            ));
        }

        let a = parse_node(&record[0], line_no)?;
        let b = parse_node(&record[1], line_no)?;
        let weight = parse_weight(&record[2], kind, line_no)?;

        let edge = Edge::canonical(a, b, weight)
            .ok_or_else(|| GraphError::parse(line_no, format!("self-loop on node {}", a + 1)))?;
        if !seen.insert(edge.key()) {
            return Err(GraphError::parse(
                line_no,
                format!("duplicate pair ({}, {})", edge.source + 1, edge.target + 1),
            ));
        }
        edges.push(edge);
    }

    Ok(EdgeList::new(kind, edges))
}

/// Read an edge file written by `write_edge_file`
pub fn read_edge_file(path: &Path, kind: WeightKind) -> Result<EdgeList> {
    let file = std::fs::File::open(path)?;
    read_edges(BufReader::new(file), kind)
}

fn parse_node(field: &str, line_no: usize) -> Result<usize> {
    match field.parse::<usize>() {
        Ok(0) => Err(GraphError::parse(line_no, "node indices are 1-based")),
        Ok(v) => Ok(v - 1),
        Err(_) => Err(GraphError::parse(
            line_no,
            format!("invalid node index '{}'", field),
        )),
    }
}

fn parse_weight(field: &str, kind: WeightKind, line_no: usize) -> Result<f64> {
    let weight: f64 = field
        .parse()
        .map_err(|_| GraphError::parse(line_no, format!("invalid weight '{}'", field)))?;
    let valid = match kind {
        WeightKind::Count => weight == 1.0 || weight == 2.0,
        WeightKind::Jaccard => weight > 0.0 && weight <= 1.0,
    };
    if !valid {
        let expected = match kind {
            WeightKind::Count => "a count of 1 or 2",
            WeightKind::Jaccard => "a Jaccard value in (0, 1]",
        };
        return Err(GraphError::parse(
            line_no,
            format!("weight {} is not {}", field, expected),
        ));
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rows_are_integers() {
        let edges = EdgeList::new(
            WeightKind::Count,
            vec![
                Edge::canonical(0, 1, 2.0).unwrap(),
                Edge::canonical(1, 2, 1.0).unwrap(),
            ],
        );
        let mut buf = Vec::new();
        write_edges(&mut buf, &edges).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t2\t2\n2\t3\t1\n");
    }

    #[test]
    fn test_jaccard_values_survive_text() {
        let edges = EdgeList::new(
            WeightKind::Jaccard,
            vec![
                Edge::canonical(0, 1, 2.0 / 3.0).unwrap(),
                Edge::canonical(2, 4, 0.1 + 0.2).unwrap(),
            ],
        );
        let mut buf = Vec::new();
        write_edges(&mut buf, &edges).unwrap();
        let back = read_edges(buf.as_slice(), WeightKind::Jaccard).unwrap();
        assert_eq!(back, edges);
    }

    #[test]
    fn test_atomic_file_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.tsv");
        let edges = EdgeList::new(WeightKind::Count, vec![Edge::canonical(3, 0, 1.0).unwrap()]);
        write_edge_file(&path, &edges).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t4\t1\n");
        // Only the target remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(read_edge_file(&path, WeightKind::Count).unwrap(), edges);
    }

    #[test]
    fn test_reversed_pairs_are_canonicalized() {
        let back = read_edges("3\t1\t1\n".as_bytes(), WeightKind::Count).unwrap();
        assert_eq!(back.edges()[0].key(), (0, 2));
    }

    #[test]
    fn test_rejects_malformed_rows() {
        let cases = [
            "1\t2\n",
            "0\t2\t1\n",
            "2\t2\t1\n",
            "1\t2\tx\n",
            "1\t2\t-1\n",
            "1\t2\t1.5\n",
            "1\t2\t7\n",
            "1\t2\t0\n",
            "1\t2\t1\n2\t1\t1\n",
        ];
        for case in cases {
            let err = read_edges(case.as_bytes(), WeightKind::Count).unwrap_err();
            assert!(matches!(err, GraphError::Parse { .. }), "case {:?}", case);
        }
    }

    #[test]
    fn test_jaccard_weights_must_be_in_unit_interval() {
        for case in ["1\t2\t0\n", "1\t2\t1.25\n", "1\t2\tNaN\n"] {
            let err = read_edges(case.as_bytes(), WeightKind::Jaccard).unwrap_err();
            assert!(matches!(err, GraphError::Parse { line: 1, .. }), "case {:?}", case);
        }
        let ok = read_edges("1\t2\t1\n2\t3\t0.25\n".as_bytes(), WeightKind::Jaccard).unwrap();
        assert_eq!(ok.weight(1, 2), Some(0.25));
    }

    #[test]
    fn test_blank_lines_skipped_and_line_numbers_reported() {
        let err = read_edges("1\t2\t1\n\nbad\n".as_bytes(), WeightKind::Count).unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 3, .. }));
    }
}
