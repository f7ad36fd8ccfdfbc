//! INP text -> network model.
//!
//! Two-pass reconstruction: element records first, then conduit endpoint
//! resolution by sequence number, so declaration-after-use orderings load
//! cleanly. Every recoverable problem is a warning; the parse aborts only
//! when the document has no usable structure at all.

use std::collections::HashSet;

use hn_core::{ParamMap, ParamValue, Position};
use hn_model::{
    ComputationalParams, Edge, ElementType, Network, Node, NodeKind, OutputRequest,
    OutputVariable, RequestType,
};
use tracing::warn;

use crate::error::{ParseError, ParseWarning};
use crate::{kind_from_keyword, kind_keyword};

/// Synthesized grid placement for imported nodes. The INP format carries
/// no coordinates, so positions are fabricated and non-semantic.
const GRID_COLS: usize = 5;
const GRID_DX: f64 = 160.0;
const GRID_DY: f64 = 120.0;

/// A successfully reconstructed network plus everything that was skipped
/// on the way.
#[derive(Debug)]
pub struct ParseOutcome {
    pub network: Network,
    pub warnings: Vec<ParseWarning>,
}

struct NodeRecord {
    kind: NodeKind,
    declared: Option<u32>,
    params: ParamMap,
    line: usize,
    text: String,
}

struct ConduitRecord {
    from: u32,
    to: u32,
    params: ParamMap,
    line: usize,
    text: String,
}

enum RequestTarget {
    Node(u32),
    Conduit(u32),
}

struct RequestRecord {
    request_type: RequestType,
    target: RequestTarget,
    variables: Vec<OutputVariable>,
    line: usize,
    text: String,
}

#[derive(Default)]
struct ControlAssignments {
    dtcomp: Option<f64>,
    dtout: Option<f64>,
    tmax: Option<f64>,
}

/// Parse an INP document.
pub fn parse_inp(input: &str) -> Result<ParseOutcome, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut node_records: Vec<NodeRecord> = Vec::new();
    let mut conduit_records: Vec<ConduitRecord> = Vec::new();
    let mut request_records: Vec<RequestRecord> = Vec::new();
    let mut controls = ControlAssignments::default();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let keyword = tokens[0].to_ascii_uppercase();

        if let Some(kind) = kind_from_keyword(&keyword) {
            let (declared, rest) = match tokens.get(1).and_then(|t| t.parse::<u32>().ok()) {
                Some(seq) => (Some(seq), &tokens[2..]),
                None => (None, &tokens[1..]),
            };
            let params = parse_pairs(rest, line, &keyword, trimmed, &mut warnings);
            node_records.push(NodeRecord {
                kind,
                declared,
                params,
                line,
                text: trimmed.to_string(),
            });
            continue;
        }

        match keyword.as_str() {
            "CONDUIT" => {
                let endpoints = (
                    tokens.get(1).and_then(|t| t.parse::<u32>().ok()),
                    tokens.get(2).and_then(|t| t.parse::<u32>().ok()),
                );
                match endpoints {
                    (Some(from), Some(to)) => {
                        let params =
                            parse_pairs(&tokens[3..], line, &keyword, trimmed, &mut warnings);
                        conduit_records.push(ConduitRecord {
                            from,
                            to,
                            params,
                            line,
                            text: trimmed.to_string(),
                        });
                    }
                    _ => push_warning(
                        &mut warnings,
                        line,
                        &keyword,
                        trimmed,
                        "expected two numeric endpoint indices",
                    ),
                }
            }
            "DTCOMP" | "DTOUT" | "TMAX" => {
                parse_control(&keyword, &tokens, trimmed, line, &mut controls, &mut warnings);
            }
            "HISTORY" | "PLOT" | "SPREADSHEET" => {
                let request_type = match keyword.as_str() {
                    "HISTORY" => RequestType::History,
                    "PLOT" => RequestType::Plot,
                    _ => RequestType::Spreadsheet,
                };
                if let Some(record) = parse_request(
                    request_type,
                    &tokens,
                    trimmed,
                    line,
                    &keyword,
                    &mut warnings,
                ) {
                    request_records.push(record);
                }
            }
            _ => push_warning(&mut warnings, line, &keyword, trimmed, "unrecognized keyword"),
        }
    }

    if node_records.is_empty() {
        return Err(ParseError::NoElements);
    }

    let mut network = Network::new();

    // Sequence assignment: declared indices win, first occurrence first;
    // collisions and undeclared records take the next free index.
    let mut taken: HashSet<u32> = HashSet::new();
    let mut next_free: u32 = 1;
    for (i, record) in node_records.iter().enumerate() {
        let sequence = match record.declared {
            Some(seq) if !taken.contains(&seq) => seq,
            Some(seq) => {
                let reassigned = alloc_sequence(&taken, &mut next_free);
                push_warning(
                    &mut warnings,
                    record.line,
                    kind_keyword(record.kind),
                    &record.text,
                    &format!("duplicate element index {}, reassigned to {}", seq, reassigned),
                );
                reassigned
            }
            None => alloc_sequence(&taken, &mut next_free),
        };
        taken.insert(sequence);

        let position = Position::new(
            (i % GRID_COLS) as f64 * GRID_DX,
            (i / GRID_COLS) as f64 * GRID_DY,
        );
        let node = Node {
            id: format!("n{}", i + 1),
            kind: record.kind,
            position,
            sequence,
            params: record.params.clone(),
        };
        if let Err(err) = network.insert_node(node) {
            push_warning(
                &mut warnings,
                record.line,
                kind_keyword(record.kind),
                &record.text,
                &err.to_string(),
            );
        }
    }

    // Second pass: endpoint resolution. Unresolved indices here are the
    // one structural failure tolerance cannot paper over.
    let mut edge_count = 0usize;
    for record in &conduit_records {
        let source = match network.node_by_sequence(record.from) {
            Some(node) => node.id.clone(),
            None => {
                return Err(ParseError::UnresolvedEndpoint {
                    line: record.line,
                    index: record.from,
                });
            }
        };
        let target = match network.node_by_sequence(record.to) {
            Some(node) => node.id.clone(),
            None => {
                return Err(ParseError::UnresolvedEndpoint {
                    line: record.line,
                    index: record.to,
                });
            }
        };
        if source == target {
            push_warning(
                &mut warnings,
                record.line,
                "CONDUIT",
                &record.text,
                "conduit connects an element to itself, dropped",
            );
            continue;
        }
        let edge = Edge {
            id: format!("c{}", edge_count + 1),
            source,
            target,
            params: record.params.clone(),
        };
        match network.insert_edge(edge) {
            Ok(()) => edge_count += 1,
            Err(err) => push_warning(
                &mut warnings,
                record.line,
                "CONDUIT",
                &record.text,
                &err.to_string(),
            ),
        }
    }

    let defaults = ComputationalParams::default();
    network.set_computational_params(ComputationalParams {
        dtcomp: controls.dtcomp.unwrap_or(defaults.dtcomp),
        dtout: controls.dtout.unwrap_or(defaults.dtout),
        tmax: controls.tmax.unwrap_or(defaults.tmax),
    });

    let mut request_count = 0usize;
    for record in request_records {
        let (element_id, element_type) = match record.target {
            RequestTarget::Node(seq) => match network.node_by_sequence(seq) {
                Some(node) => (node.id.clone(), ElementType::Node),
                None => {
                    push_warning(
                        &mut warnings,
                        record.line,
                        record.request_type.keyword(),
                        &record.text,
                        &format!("output request references undefined element index {}", seq),
                    );
                    continue;
                }
            },
            RequestTarget::Conduit(index) => {
                let resolved = (index >= 1)
                    .then(|| network.edges().get(index as usize - 1))
                    .flatten()
                    .map(|e| e.id.clone());
                match resolved {
                    Some(id) => (id, ElementType::Edge),
                    None => {
                        push_warning(
                            &mut warnings,
                            record.line,
                            record.request_type.keyword(),
                            &record.text,
                            &format!("output request references undefined conduit {}", index),
                        );
                        continue;
                    }
                }
            }
        };

        let request = OutputRequest {
            id: format!("r{}", request_count + 1),
            element_id,
            element_type,
            request_type: record.request_type,
            variables: record.variables,
        };
        match network.insert_output_request(request) {
            Ok(()) => request_count += 1,
            Err(err) => push_warning(
                &mut warnings,
                record.line,
                record.request_type.keyword(),
                &record.text,
                &err.to_string(),
            ),
        }
    }

    Ok(ParseOutcome { network, warnings })
}

fn alloc_sequence(taken: &HashSet<u32>, next_free: &mut u32) -> u32 {
    while taken.contains(next_free) {
        *next_free += 1;
    }
    let seq = *next_free;
    *next_free += 1;
    seq
}

/// Read `NAME VALUE` pairs; a trailing unpaired token is a warning, not a
/// reason to drop the line.
fn parse_pairs(
    tokens: &[&str],
    line: usize,
    keyword: &str,
    text: &str,
    warnings: &mut Vec<ParseWarning>,
) -> ParamMap {
    let mut params = ParamMap::new();
    let mut chunks = tokens.chunks_exact(2);
    for pair in &mut chunks {
        params.set(pair[0], ParamValue::from_token(pair[1]));
    }
    if !chunks.remainder().is_empty() {
        push_warning(
            warnings,
            line,
            keyword,
            text,
            &format!("parameter '{}' has no value", chunks.remainder()[0]),
        );
    }
    params
}

fn parse_control(
    keyword: &str,
    tokens: &[&str],
    text: &str,
    line: usize,
    controls: &mut ControlAssignments,
    warnings: &mut Vec<ParseWarning>,
) {
    let value = match tokens.get(1).and_then(|t| t.parse::<f64>().ok()) {
        Some(v) if v.is_finite() => v,
        _ => {
            push_warning(warnings, line, keyword, text, "expected a numeric value");
            return;
        }
    };
    let slot = match keyword {
        "DTCOMP" => &mut controls.dtcomp,
        "DTOUT" => &mut controls.dtout,
        _ => &mut controls.tmax,
    };
    if slot.is_some() {
        push_warning(warnings, line, keyword, text, "overwrites an earlier value");
    }
    *slot = Some(value);
}

fn parse_request(
    request_type: RequestType,
    tokens: &[&str],
    text: &str,
    line: usize,
    keyword: &str,
    warnings: &mut Vec<ParseWarning>,
) -> Option<RequestRecord> {
    let target_kind = tokens.get(1).map(|t| t.to_ascii_uppercase());
    let index = tokens.get(2).and_then(|t| t.parse::<u32>().ok());
    let target = match (target_kind.as_deref(), index) {
        (Some("NODE"), Some(i)) => RequestTarget::Node(i),
        (Some("CONDUIT"), Some(i)) => RequestTarget::Conduit(i),
        _ => {
            push_warning(
                warnings,
                line,
                keyword,
                text,
                "expected NODE or CONDUIT followed by an element index",
            );
            return None;
        }
    };

    let mut variables: Vec<OutputVariable> = Vec::new();
    for token in &tokens[3..] {
        match OutputVariable::from_token(token) {
            Some(var) => {
                if !variables.contains(&var) {
                    variables.push(var);
                }
            }
            None => push_warning(
                warnings,
                line,
                keyword,
                text,
                &format!("unknown output variable '{}'", token),
            ),
        }
    }
    if variables.is_empty() {
        push_warning(
            warnings,
            line,
            keyword,
            text,
            "no valid output variables, request dropped",
        );
        return None;
    }

    Some(RequestRecord {
        request_type,
        target,
        variables,
        line,
        text: text.to_string(),
    })
}

fn push_warning(
    warnings: &mut Vec<ParseWarning>,
    line: usize,
    keyword: &str,
    text: &str,
    reason: &str,
) {
    warn!(line, keyword, reason, "skipping INP input");
    warnings.push(ParseWarning {
        line,
        keyword: keyword.to_string(),
        text: text.to_string(),
        reason: reason.to_string(),
    });
}
