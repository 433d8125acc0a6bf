//! Graph construction from a snapshot.
//!
//! Two passes: intern every resource the snapshot declares, then add
//! association edges. Reference targets absent after the first pass become
//! unresolved placeholder nodes labeled from the identifier's trailing
//! segment. Re-interning an identifier is idempotent.

use petgraph::graph::NodeIndex;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::model::{ResourceId, Topology};

use super::graph::CanonicalGraph;
use super::types::{CanonicalNode, NodeKind, Relation};

#[derive(Default)]
pub(super) struct GraphBuilder {
    out: CanonicalGraph,
    seen_edges: FxHashSet<(NodeIndex, NodeIndex, Relation)>,
}

impl GraphBuilder {
    pub(super) fn build(mut self, topology: &Topology) -> CanonicalGraph {
        self.intern_resources(topology);
        self.link_references(topology);

        debug!(
            nodes = self.out.node_count(),
            edges = self.out.edge_count(),
            "canonical graph resolved"
        );
        self.out
    }

    fn intern_resources(&mut self, topology: &Topology) {
        for vnet in &topology.virtual_networks {
            self.intern(&vnet.id, &vnet.name, NodeKind::VirtualNetwork);
            for subnet in &vnet.subnets {
                self.intern(&subnet.id, &subnet.name, NodeKind::Subnet);
            }
        }
        for nsg in &topology.security_groups {
            self.intern(&nsg.id, &nsg.name, NodeKind::SecurityGroup);
        }
        for rt in &topology.route_tables {
            self.intern(&rt.id, &rt.name, NodeKind::RouteTable);
        }
        for nat in &topology.nat_gateways {
            self.intern(&nat.id, &nat.name, NodeKind::NatGateway);
        }
        for vpn in &topology.vpn_gateways {
            self.intern(&vpn.id, &vpn.name, NodeKind::VpnGateway);
        }
        for appgw in &topology.app_gateways {
            self.intern(&appgw.id, &appgw.name, NodeKind::ApplicationGateway);
        }
        for fw in &topology.firewalls {
            self.intern(&fw.id, &fw.name, NodeKind::Firewall);
        }
        for pe in &topology.private_endpoints {
            self.intern(&pe.id, &pe.name, NodeKind::PrivateEndpoint);
        }
        for lb in &topology.load_balancers {
            self.intern(&lb.id, &lb.name, NodeKind::LoadBalancer);
        }
    }

    fn link_references(&mut self, topology: &Topology) {
        for vnet in &topology.virtual_networks {
            for subnet in &vnet.subnets {
                self.link(&vnet.id, &subnet.id, Relation::Contains, NodeKind::Subnet, None);
                if let Some(nsg) = &subnet.security_group {
                    self.link(&subnet.id, nsg, Relation::SecuredBy, NodeKind::SecurityGroup, None);
                }
                if let Some(rt) = &subnet.route_table {
                    self.link(&subnet.id, rt, Relation::RoutedBy, NodeKind::RouteTable, None);
                }
                if let Some(nat) = &subnet.nat_gateway {
                    self.link(&subnet.id, nat, Relation::EgressVia, NodeKind::NatGateway, None);
                }
            }
            for peering in &vnet.peerings {
                let remote_label = (!peering.remote_vnet_name.is_empty())
                    .then_some(peering.remote_vnet_name.as_str());
                self.link(
                    &vnet.id,
                    &peering.remote_vnet,
                    Relation::PeeredWith,
                    NodeKind::VirtualNetwork,
                    remote_label,
                );
            }
        }

        for pe in &topology.private_endpoints {
            self.link(&pe.id, &pe.subnet, Relation::EndpointIn, NodeKind::Subnet, None);
        }
        for vpn in &topology.vpn_gateways {
            self.link(&vpn.id, &vpn.vnet, Relation::GatewayOf, NodeKind::VirtualNetwork, None);
        }
        for appgw in &topology.app_gateways {
            if let Some(subnet) = &appgw.subnet {
                self.link(&appgw.id, subnet, Relation::AttachedTo, NodeKind::Subnet, None);
            }
        }
        for fw in &topology.firewalls {
            if let Some(subnet) = &fw.subnet {
                self.link(&fw.id, subnet, Relation::AttachedTo, NodeKind::Subnet, None);
            }
        }
    }

    /// Insert the node for `id` if absent; return its index. First insertion
    /// wins, so a duplicate resource declaration keeps the original node.
    fn intern(&mut self, id: &ResourceId, name: &str, kind: NodeKind) -> Option<NodeIndex> {
        if id.is_empty() {
            return None;
        }
        if let Some(ix) = self.out.index.get(id) {
            return Some(*ix);
        }
        let ix = self.out.graph.add_node(CanonicalNode {
            id: id.clone(),
            label: name.to_string(),
            kind,
            resolved: true,
        });
        self.out.index.insert(id.clone(), ix);
        Some(ix)
    }

    /// Intern a reference target that may be absent from the snapshot.
    fn intern_target(
        &mut self,
        id: &ResourceId,
        kind: NodeKind,
        label: Option<&str>,
    ) -> Option<NodeIndex> {
        if id.is_empty() {
            return None;
        }
        if let Some(ix) = self.out.index.get(id) {
            return Some(*ix);
        }
        let label = label.unwrap_or_else(|| id.leaf()).to_string();
        debug!(id = %id, kind = kind.name(), "unresolved reference, adding placeholder node");
        let ix = self.out.graph.add_node(CanonicalNode {
            id: id.clone(),
            label,
            kind,
            resolved: false,
        });
        self.out.index.insert(id.clone(), ix);
        Some(ix)
    }

    /// Add one edge per (source, target, relation) triple. The source must
    /// already be interned; the target is interned on demand.
    fn link(
        &mut self,
        source: &ResourceId,
        target: &ResourceId,
        relation: Relation,
        target_kind: NodeKind,
        target_label: Option<&str>,
    ) {
        let Some(source_ix) = self.out.index.get(source).copied() else {
            return;
        };
        let Some(target_ix) = self.intern_target(target, target_kind, target_label) else {
            return;
        };
        if self.seen_edges.insert((source_ix, target_ix, relation)) {
            self.out.graph.add_edge(source_ix, target_ix, relation);
        }
    }
}
