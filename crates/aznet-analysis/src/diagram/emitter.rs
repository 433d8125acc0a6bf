//! Diagram emitter.
//!
//! Identity comes from the canonical graph: shared infrastructure renders as
//! one node per canonical identifier with one edge per referencing subnet,
//! and unresolved references render as dashed external nodes. Orphaned
//! infrastructure is still emitted - inventory completeness beats
//! traversal reachability. The only value-based link is the firewall
//! next-hop match, resolved through `FirewallIpIndex`.

use aznet_core::model::{ResourceId, Topology};
use aznet_core::resolver::{CanonicalGraph, FirewallIpIndex, NodeKind, Relation};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::types::{
    Diagram, DiagramCluster, DiagramEdge, DiagramNode, DiagramOptions, EdgeStyle, NodeLabel,
    NodeShape, TableLabel, TableRow,
};

const VNET_CLUSTER_FILL: &str = "#e6f3ff";
const SUBNET_PROTECTED_FILL: &str = "#90EE90";
const SUBNET_BARE_FILL: &str = "#FFB6C1";
const NSG_FILL: &str = "#FFE4B5";
const ROUTE_TABLE_FILL: &str = "#DDA0DD";
const NAT_FILL: &str = "#98FB98";
const EXTERNAL_FILL: &str = "#D3D3D3";
const VPN_FILL: &str = "#9370DB";
const APPGW_FILL: &str = "#FF69B4";
const LB_FILL: &str = "#FFA500";
const FIREWALL_FILL: &str = "#FF6347";
const INTERNET_FILL: &str = "#87CEEB";
const LEGEND_FILL: &str = "#f0f0f0";

#[derive(Debug, Default)]
pub struct DiagramEmitter {
    options: DiagramOptions,
}

impl DiagramEmitter {
    pub fn new(options: DiagramOptions) -> Self {
        Self { options }
    }

    pub fn emit(&self, graph: &CanonicalGraph, topology: &Topology) -> Diagram {
        let mut build = Build {
            out: Diagram {
                title: format!(
                    "Network Topology\n{} / {}",
                    topology.subscription_id, topology.resource_group
                ),
                ..Default::default()
            },
            ids: DotIds::default(),
        };

        build.emit_vnet_clusters(topology);
        build.emit_shared_infrastructure(graph);
        build.emit_association_edges(graph);
        build.emit_peerings(topology);
        build.emit_gateways(topology);
        build.emit_firewalls(topology);
        if self.options.include_endpoints && !topology.private_endpoints.is_empty() {
            build.emit_endpoint_table(topology);
        }
        if self.options.include_legend {
            build.emit_legend();
        }

        debug!(
            clusters = build.out.clusters.len(),
            nodes = build.out.nodes.len(),
            edges = build.out.edges.len(),
            "diagram emitted"
        );
        build.out
    }
}

/// Allocates stable DOT identifiers and keeps the resource-to-node mapping.
#[derive(Debug, Default)]
struct DotIds {
    by_resource: FxHashMap<ResourceId, String>,
    used: FxHashSet<String>,
}

impl DotIds {
    /// Reserve a DOT id for a resource. Leaf-name collisions between distinct
    /// identifiers get a numeric suffix.
    fn assign(&mut self, resource: &ResourceId, candidate: String) -> String {
        if let Some(existing) = self.by_resource.get(resource) {
            return existing.clone();
        }
        let mut id = candidate.clone();
        let mut n = 2;
        while !self.used.insert(id.clone()) {
            id = format!("{candidate}_{n}");
            n += 1;
        }
        self.by_resource.insert(resource.clone(), id.clone());
        id
    }

    fn get(&self, resource: &ResourceId) -> Option<&String> {
        self.by_resource.get(resource)
    }
}

struct Build {
    out: Diagram,
    ids: DotIds,
}

impl Build {
    fn emit_vnet_clusters(&mut self, topology: &Topology) {
        for (i, vnet) in topology.virtual_networks.iter().enumerate() {
            let anchor_id = self.ids.assign(&vnet.id, format!("vnet_{i}"));
            let mut nodes = vec![DiagramNode::text(anchor_id, "", NodeShape::Point, "")];

            for (j, subnet) in vnet.subnets.iter().enumerate() {
                let subnet_id = self.ids.assign(&subnet.id, format!("subnet_{i}_{j}"));
                let fill = if subnet.security_group.is_some() {
                    SUBNET_PROTECTED_FILL
                } else {
                    SUBNET_BARE_FILL
                };
                nodes.push(DiagramNode::text(
                    subnet_id,
                    format!("{}\n{}", subnet.name, subnet.address_prefix),
                    NodeShape::Box,
                    fill,
                ));
            }

            self.out.clusters.push(DiagramCluster {
                id: format!("cluster_{}", sanitize(&vnet.name)),
                label: format!("{}\n{}", vnet.name, vnet.address_space.join("\n")),
                fill: VNET_CLUSTER_FILL.into(),
                nodes,
            });
        }
    }

    /// One node per canonical NSG/route-table/NAT identifier, outside any
    /// cluster, orphans included. External peering targets render as dashed
    /// placeholders.
    fn emit_shared_infrastructure(&mut self, graph: &CanonicalGraph) {
        for node in graph.nodes() {
            let (prefix, title, fill, shape) = match node.kind {
                NodeKind::SecurityGroup => ("nsg", "NSG", NSG_FILL, NodeShape::Octagon),
                NodeKind::RouteTable => {
                    ("rt", "Route Table", ROUTE_TABLE_FILL, NodeShape::Parallelogram)
                }
                NodeKind::NatGateway => ("nat", "NAT Gateway", NAT_FILL, NodeShape::Diamond),
                NodeKind::VirtualNetwork if !node.resolved => {
                    let id = self
                        .ids
                        .assign(&node.id, format!("remote_{}", sanitize(&node.label)));
                    self.out.nodes.push(DiagramNode {
                        id,
                        label: NodeLabel::Text(format!("{}\n(External)", node.label)),
                        shape: NodeShape::Box,
                        fill: EXTERNAL_FILL.into(),
                        dashed: true,
                        rank_sink: false,
                    });
                    continue;
                }
                _ => continue,
            };

            let id = self
                .ids
                .assign(&node.id, format!("{prefix}_{}", sanitize(&node.label)));
            let mut label = format!("{title}\n{}", node.label);
            if !node.resolved {
                label.push_str("\n(external)");
            }
            self.out.nodes.push(DiagramNode {
                id,
                label: NodeLabel::Text(label),
                shape,
                fill: fill.into(),
                dashed: !node.resolved,
                rank_sink: false,
            });
        }
    }

    /// Subnet-to-infrastructure edges, one per canonical association.
    fn emit_association_edges(&mut self, graph: &CanonicalGraph) {
        for edge in graph.edges() {
            let (from, to, label, style, color) = match edge.relation {
                // The protects arrow points at the subnet it shields.
                Relation::SecuredBy => (&edge.target.id, &edge.source.id, "protects", EdgeStyle::Dashed, "orange"),
                Relation::RoutedBy => (&edge.source.id, &edge.target.id, "routes", EdgeStyle::Dotted, "purple"),
                Relation::EgressVia => (&edge.source.id, &edge.target.id, "egress", EdgeStyle::Solid, "green"),
                _ => continue,
            };
            let (Some(from), Some(to)) = (self.ids.get(from), self.ids.get(to)) else {
                continue;
            };
            self.out.edges.push(DiagramEdge {
                from: from.clone(),
                to: to.clone(),
                label: label.into(),
                style,
                color: color.into(),
                bidirectional: false,
            });
        }
    }

    fn emit_peerings(&mut self, topology: &Topology) {
        for vnet in &topology.virtual_networks {
            for peering in &vnet.peerings {
                let (Some(from), Some(to)) =
                    (self.ids.get(&vnet.id), self.ids.get(&peering.remote_vnet))
                else {
                    continue;
                };
                let color = if peering.state == "Connected" {
                    "green"
                } else {
                    "red"
                };
                self.out.edges.push(DiagramEdge {
                    from: from.clone(),
                    to: to.clone(),
                    label: format!("peering\n{}", peering.state),
                    style: EdgeStyle::Dashed,
                    color: color.into(),
                    bidirectional: true,
                });
            }
        }
    }

    fn emit_gateways(&mut self, topology: &Topology) {
        for (i, vpn) in topology.vpn_gateways.iter().enumerate() {
            let id = self.ids.assign(&vpn.id, format!("vpn_{i}"));
            self.out.nodes.push(DiagramNode::text(
                id.clone(),
                format!("VPN GW\n{}\n{}", vpn.name, vpn.sku),
                NodeShape::Diamond,
                VPN_FILL,
            ));
            if let Some(vnet) = self.ids.get(&vpn.vnet) {
                self.out.edges.push(DiagramEdge {
                    from: id,
                    to: vnet.clone(),
                    label: "gateway".into(),
                    style: EdgeStyle::Bold,
                    color: "purple".into(),
                    bidirectional: false,
                });
            }
        }

        for (i, appgw) in topology.app_gateways.iter().enumerate() {
            let id = self.ids.assign(&appgw.id, format!("appgw_{i}"));
            let waf = if appgw.waf_enabled {
                "\n[WAF Enabled]"
            } else {
                ""
            };
            self.out.nodes.push(DiagramNode::text(
                id.clone(),
                format!("AppGW\n{}\n{}{}", appgw.name, appgw.sku, waf),
                NodeShape::Ellipse,
                APPGW_FILL,
            ));
            if let Some(subnet) = appgw.subnet.as_ref().and_then(|s| self.ids.get(s)) {
                self.out.edges.push(DiagramEdge {
                    from: id,
                    to: subnet.clone(),
                    label: "attached".into(),
                    style: EdgeStyle::Dashed,
                    color: "gray".into(),
                    bidirectional: false,
                });
            }
        }

        for (i, lb) in topology.load_balancers.iter().enumerate() {
            let id = self.ids.assign(&lb.id, format!("lb_{i}"));
            self.out.nodes.push(DiagramNode::text(
                id,
                format!("LB\n{}\n{}", lb.name, lb.sku),
                NodeShape::Ellipse,
                LB_FILL,
            ));
        }
    }

    /// Firewall nodes, route-table egress edges, and the derived internet
    /// egress edge for firewalls that both own a public IP and are the
    /// IP-matched next hop of some route.
    fn emit_firewalls(&mut self, topology: &Topology) {
        let ip_index = FirewallIpIndex::from_topology(topology);

        for (i, fw) in topology.firewalls.iter().enumerate() {
            let id = self.ids.assign(&fw.id, format!("fw_{i}"));
            self.out.nodes.push(DiagramNode::text(
                id.clone(),
                format!("Firewall\n{}\n{}", fw.name, fw.private_ip),
                NodeShape::Box,
                FIREWALL_FILL,
            ));
            if let Some(subnet) = fw.subnet.as_ref().and_then(|s| self.ids.get(s)) {
                self.out.edges.push(DiagramEdge {
                    from: id,
                    to: subnet.clone(),
                    label: "attached".into(),
                    style: EdgeStyle::Dashed,
                    color: "gray".into(),
                    bidirectional: false,
                });
            }
        }

        // Route-table -> firewall edges, one per (table, firewall) pair.
        let mut matched: FxHashSet<ResourceId> = FxHashSet::default();
        let mut drawn: FxHashSet<(String, String)> = FxHashSet::default();
        for rt in &topology.route_tables {
            for route in &rt.routes {
                let Some(fw_id) = ip_index.match_next_hop(route) else {
                    continue;
                };
                matched.insert(fw_id.clone());
                let (Some(from), Some(to)) = (self.ids.get(&rt.id), self.ids.get(fw_id)) else {
                    continue;
                };
                if drawn.insert((from.clone(), to.clone())) {
                    self.out.edges.push(DiagramEdge {
                        from: from.clone(),
                        to: to.clone(),
                        label: "egress via FW".into(),
                        style: EdgeStyle::Bold,
                        color: "firebrick".into(),
                        bidirectional: false,
                    });
                }
            }
        }

        let mut internet_emitted = false;
        for fw in &topology.firewalls {
            if fw.public_ips.is_empty() || !matched.contains(&fw.id) {
                continue;
            }
            if !internet_emitted {
                self.out.nodes.push(DiagramNode::text(
                    "internet",
                    "Internet",
                    NodeShape::Ellipse,
                    INTERNET_FILL,
                ));
                internet_emitted = true;
            }
            let Some(from) = self.ids.get(&fw.id) else {
                continue;
            };
            self.out.edges.push(DiagramEdge {
                from: from.clone(),
                to: "internet".into(),
                label: "Public IP egress".into(),
                style: EdgeStyle::Bold,
                color: "blue".into(),
                bidirectional: false,
            });
        }
    }

    fn emit_endpoint_table(&mut self, topology: &Topology) {
        let rows = topology
            .private_endpoints
            .iter()
            .map(|pe| TableRow {
                cells: vec![
                    pe.name.clone(),
                    pe.target_service.leaf().to_string(),
                    pe.subnet.leaf().to_string(),
                    pe.private_ip.clone(),
                    pe.state.clone(),
                ],
                fill: None,
            })
            .collect();

        self.out.nodes.push(DiagramNode {
            id: "pe_table".into(),
            label: NodeLabel::Table(TableLabel {
                title: "Private Endpoints".into(),
                columns: vec![
                    "Name".into(),
                    "Target Service".into(),
                    "Subnet".into(),
                    "Private IP".into(),
                    "Status".into(),
                ],
                rows,
            }),
            shape: NodeShape::Plaintext,
            fill: String::new(),
            dashed: false,
            rank_sink: true,
        });
    }

    fn emit_legend(&mut self) {
        let entry = |text: &str, fill: &str| TableRow {
            cells: vec![text.to_string()],
            fill: Some(fill.to_string()),
        };
        self.out.clusters.push(DiagramCluster {
            id: "cluster_legend".into(),
            label: "Legend".into(),
            fill: LEGEND_FILL.into(),
            nodes: vec![DiagramNode {
                id: "legend".into(),
                label: NodeLabel::Table(TableLabel {
                    title: String::new(),
                    columns: Vec::new(),
                    rows: vec![
                        entry("Subnet (with NSG)", SUBNET_PROTECTED_FILL),
                        entry("Subnet (no NSG)", SUBNET_BARE_FILL),
                        entry("NSG", NSG_FILL),
                        entry("Route Table", ROUTE_TABLE_FILL),
                        entry("NAT Gateway", NAT_FILL),
                        entry("VPN Gateway", VPN_FILL),
                        entry("Load Balancer", LB_FILL),
                    ],
                }),
                shape: NodeShape::Plaintext,
                fill: String::new(),
                dashed: false,
                rank_sink: false,
            }],
        });
    }
}

/// Replace characters that are invalid in DOT identifiers.
pub(super) fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
