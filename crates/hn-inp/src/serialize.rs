//! Network -> INP text.

use hn_core::ParamValue;
use hn_model::{ElementType, Network, Node, NodeKind, RequestType};

use crate::error::{SerializeError, SerializeIssue};
use crate::kind_keyword;
use crate::schema::FormatSchema;

/// Serialize a network to INP text.
///
/// Validation is collected: every dangling reference, missing or
/// non-numeric required parameter, and out-of-range computational control
/// in the model appears in the returned error. Output is deterministic:
/// the same model always yields byte-identical text.
pub fn serialize_network(
    network: &Network,
    schema: &FormatSchema,
) -> Result<String, SerializeError> {
    let issues = collect_issues(network, schema);
    if !issues.is_empty() {
        return Err(SerializeError { issues });
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push("* HYDRAULIC TRANSIENT NETWORK MODEL".to_string());
    lines.push("* NETWORK ELEMENTS".to_string());

    // Nodes ascending by sequence, grouped by kind in canonical order.
    for kind in NodeKind::ALL {
        let mut of_kind: Vec<&Node> = network.nodes().iter().filter(|n| n.kind == kind).collect();
        of_kind.sort_by_key(|n| n.sequence);
        for node in of_kind {
            let mut line = format!("{} {}", kind_keyword(kind), node.sequence);
            push_params(&mut line, node.params.iter());
            lines.push(line);
        }
    }

    // Conduits in insertion order; endpoints by node sequence.
    for edge in network.edges() {
        // Both resolve: dangling endpoints were collected above.
        let from = network.node(&edge.source).map(|n| n.sequence).unwrap_or(0);
        let to = network.node(&edge.target).map(|n| n.sequence).unwrap_or(0);
        let mut line = format!("CONDUIT {} {}", from, to);
        push_params(&mut line, edge.params.iter());
        lines.push(line);
    }

    let params = network.computational_params();
    lines.push("* COMPUTATIONAL CONTROLS".to_string());
    lines.push(format!("DTCOMP {}", params.dtcomp));
    lines.push(format!("DTOUT {}", params.dtout));
    lines.push(format!("TMAX {}", params.tmax));

    if !network.output_requests().is_empty() {
        lines.push("* OUTPUT REQUESTS".to_string());
        for request_type in RequestType::ALL {
            for request in network
                .output_requests()
                .iter()
                .filter(|r| r.request_type == request_type)
            {
                let target = match request.element_type {
                    ElementType::Node => {
                        let seq = network
                            .node(&request.element_id)
                            .map(|n| n.sequence)
                            .unwrap_or(0);
                        format!("NODE {}", seq)
                    }
                    ElementType::Edge => {
                        let index = network
                            .edges()
                            .iter()
                            .position(|e| e.id == request.element_id)
                            .map(|i| i + 1)
                            .unwrap_or(0);
                        format!("CONDUIT {}", index)
                    }
                };
                let vars: Vec<&str> = request.variables.iter().map(|v| v.keyword()).collect();
                lines.push(format!(
                    "{} {} {}",
                    request.request_type.keyword(),
                    target,
                    vars.join(" ")
                ));
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}

fn push_params<'a>(line: &mut String, params: impl Iterator<Item = (&'a str, &'a ParamValue)>) {
    for (name, value) in params {
        line.push(' ');
        line.push_str(name);
        line.push(' ');
        line.push_str(&value.to_string());
    }
}

fn collect_issues(network: &Network, schema: &FormatSchema) -> Vec<SerializeIssue> {
    let mut issues = Vec::new();

    // 1. Dangling conduit endpoints fail the whole export.
    for edge in network.edges() {
        for endpoint in [&edge.source, &edge.target] {
            if network.node(endpoint).is_none() {
                issues.push(SerializeIssue::DanglingEndpoint {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }

    // 2. Required numeric parameters, reported per element.
    for node in network.nodes() {
        check_required(
            &node.id,
            schema.required_for_kind(node.kind),
            |name| node.params.get(name),
            &mut issues,
        );
    }
    for edge in network.edges() {
        check_required(
            &edge.id,
            schema.required_for_conduit(),
            |name| edge.params.get(name),
            &mut issues,
        );
    }

    // 3. Computational controls must be finite and positive.
    let params = network.computational_params();
    for (field, value) in [
        ("DTCOMP", params.dtcomp),
        ("DTOUT", params.dtout),
        ("TMAX", params.tmax),
    ] {
        if !hn_core::is_finite_positive(value) {
            issues.push(SerializeIssue::InvalidControl { field, value });
        }
    }

    // Output requests referencing removed elements cannot be built through
    // the model API, but a hand-assembled network is still reported rather
    // than emitted with a zero index.
    for request in network.output_requests() {
        let resolves = match request.element_type {
            ElementType::Node => network.node(&request.element_id).is_some(),
            ElementType::Edge => network.edge(&request.element_id).is_some(),
        };
        if !resolves {
            issues.push(SerializeIssue::DanglingRequest {
                request_id: request.id.clone(),
                element_id: request.element_id.clone(),
            });
        }
    }

    issues
}

fn check_required<'a>(
    element_id: &str,
    required: &[&'static str],
    lookup: impl Fn(&str) -> Option<&'a ParamValue>,
    issues: &mut Vec<SerializeIssue>,
) {
    for &name in required {
        match lookup(name) {
            None => issues.push(SerializeIssue::MissingParameter {
                element_id: element_id.to_string(),
                name,
            }),
            Some(ParamValue::Number(v)) if v.is_finite() => {}
            Some(value) => issues.push(SerializeIssue::NonNumericParameter {
                element_id: element_id.to_string(),
                name,
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::Position;
    use hn_model::{ComputationalParamsPatch, ElementType, OutputRequestSpec, OutputVariable};

    fn valid_network() -> Network {
        let mut network = Network::new();
        let a = network.add_node(NodeKind::Reservoir, Position::new(0.0, 0.0));
        let b = network.add_node(NodeKind::Junction, Position::new(10.0, 0.0));
        network
            .set_param(&a, ElementType::Node, "ELEV", 100.0.into())
            .unwrap();
        let c = network.connect(&a, &b).unwrap();
        network
            .set_param(&c, ElementType::Edge, "LENGTH", 250.0.into())
            .unwrap();
        network
            .set_param(&c, ElementType::Edge, "DIAMETER", 1.2.into())
            .unwrap();
        network
    }

    #[test]
    fn serialization_is_deterministic() {
        let network = valid_network();
        let schema = FormatSchema::whamo();
        let first = serialize_network(&network, &schema).unwrap();
        let second = serialize_network(&network, &schema).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn issues_are_collected_not_short_circuited() {
        let mut network = Network::new();
        // Reservoir missing ELEV, surge tank missing both ELEV and AREA,
        // and a bad control value: four issues in one failure.
        network.add_node(NodeKind::Reservoir, Position::default());
        network.add_node(NodeKind::SurgeTank, Position::default());
        network.update_computational_params(ComputationalParamsPatch {
            tmax: Some(-1.0),
            ..Default::default()
        });

        let err = serialize_network(&network, &FormatSchema::whamo()).unwrap_err();
        assert_eq!(err.issues.len(), 4);
        assert!(
            err.issues
                .iter()
                .any(|i| matches!(i, SerializeIssue::InvalidControl { field: "TMAX", .. }))
        );
    }

    #[test]
    fn text_parameter_in_numeric_slot_is_reported() {
        let mut network = Network::new();
        let a = network.add_node(NodeKind::Reservoir, Position::default());
        network
            .set_param(&a, ElementType::Node, "ELEV", "HIGH".into())
            .unwrap();

        let err = serialize_network(&network, &FormatSchema::whamo()).unwrap_err();
        assert!(matches!(
            err.issues.as_slice(),
            [SerializeIssue::NonNumericParameter { name: "ELEV", .. }]
        ));
    }

    #[test]
    fn output_blocks_follow_request_type_order() {
        let mut network = valid_network();
        let node_id = network.nodes()[0].id.clone();
        // Added out of order on purpose.
        network
            .add_output_request(OutputRequestSpec {
                element_id: node_id.clone(),
                element_type: ElementType::Node,
                request_type: hn_model::RequestType::Spreadsheet,
                variables: vec![OutputVariable::Elev],
            })
            .unwrap();
        network
            .add_output_request(OutputRequestSpec {
                element_id: node_id,
                element_type: ElementType::Node,
                request_type: hn_model::RequestType::History,
                variables: vec![OutputVariable::Head],
            })
            .unwrap();

        let text = serialize_network(&network, &FormatSchema::whamo()).unwrap();
        let history = text.find("HISTORY NODE").unwrap();
        let spreadsheet = text.find("SPREADSHEET NODE").unwrap();
        assert!(history < spreadsheet);
    }

    #[test]
    fn nodes_emit_grouped_by_kind_then_sequence() {
        let mut network = Network::new();
        let j = network.add_node(NodeKind::Junction, Position::default());
        let r = network.add_node(NodeKind::Reservoir, Position::default());
        network
            .set_param(&r, ElementType::Node, "ELEV", 10.0.into())
            .unwrap();
        let _ = j;

        let text = serialize_network(&network, &FormatSchema::whamo()).unwrap();
        let reservoir = text.find("RESERVOIR 2").unwrap();
        let junction = text.find("JUNCTION 1").unwrap();
        assert!(reservoir < junction);
    }
}
