//! End-to-end: resolve, analyze, and emit over one snapshot, checking that
//! every derived view agrees on identity and dedup.

use aznet_analysis::{DiagramEmitter, DiagramOptions, TopologyAnalyzer};
use aznet_core::model::{
    NatGateway, NetworkSecurityGroup, ResourceId, RouteTable, Subnet, Topology, VirtualNetwork,
};
use aznet_core::resolver::{CanonicalGraph, NodeKind, Relation};

fn fixture() -> Topology {
    let nsg_id = "/subscriptions/t/networkSecurityGroups/app-nsg";
    let rt_id = "/subscriptions/t/routeTables/app-rt";
    let nat_id = "/subscriptions/t/natGateways/shared-nat";

    Topology {
        subscription_id: "test-sub".into(),
        resource_group: "test-rg".into(),
        virtual_networks: vec![VirtualNetwork {
            id: ResourceId::new("/subscriptions/t/virtualNetworks/vnet1"),
            name: "vnet1".into(),
            location: "eastus".into(),
            address_space: vec!["10.0.0.0/16".into()],
            subnets: vec![
                Subnet {
                    id: ResourceId::new("/subscriptions/t/virtualNetworks/vnet1/subnets/app"),
                    name: "app".into(),
                    address_prefix: "10.0.1.0/24".into(),
                    security_group: Some(ResourceId::new(nsg_id)),
                    route_table: Some(ResourceId::new(rt_id)),
                    nat_gateway: Some(ResourceId::new(nat_id)),
                },
                Subnet {
                    id: ResourceId::new("/subscriptions/t/virtualNetworks/vnet1/subnets/bare"),
                    name: "bare".into(),
                    address_prefix: "10.0.2.0/24".into(),
                    security_group: None,
                    route_table: None,
                    nat_gateway: Some(ResourceId::new(nat_id)),
                },
            ],
            peerings: Vec::new(),
        }],
        security_groups: vec![NetworkSecurityGroup {
            id: ResourceId::new(nsg_id),
            name: "app-nsg".into(),
            location: "eastus".into(),
            rules: Vec::new(),
        }],
        route_tables: vec![RouteTable {
            id: ResourceId::new(rt_id),
            name: "app-rt".into(),
            location: "eastus".into(),
            routes: Vec::new(),
        }],
        nat_gateways: vec![NatGateway {
            id: ResourceId::new(nat_id),
            name: "shared-nat".into(),
            location: "eastus".into(),
            public_ips: Vec::new(),
        }],
        ..Default::default()
    }
}

#[test]
fn orphans_graph_and_diagram_agree_on_the_shared_nat() {
    let topology = fixture();

    // Orphan view: the bare subnet misses both attachments, the NAT is used.
    let report = TopologyAnalyzer::new().analyze(&topology);
    assert_eq!(report.orphaned.subnets_without_nsg, vec!["vnet1/bare"]);
    assert_eq!(report.orphaned.subnets_without_route_table, vec!["vnet1/bare"]);
    assert!(report.orphaned.unused_nat_gateways.is_empty());
    assert!(report.orphaned.unattached_nsgs.is_empty());
    assert!(report.orphaned.unused_route_tables.is_empty());

    // Identity view: one canonical NAT node, two egress edges.
    let graph = CanonicalGraph::from_topology(&topology);
    assert_eq!(graph.nodes_of_kind(NodeKind::NatGateway).count(), 1);
    assert_eq!(graph.edges_of(Relation::EgressVia).count(), 2);

    // Diagram view: same dedup, one NAT node with two edges.
    let dot = DiagramEmitter::new(DiagramOptions::default())
        .emit(&graph, &topology)
        .to_dot();
    assert_eq!(dot.matches("[label=\"NAT Gateway\\nshared-nat\"").count(), 1);
    assert_eq!(
        dot.matches("-> nat_shared_nat [style=solid, color=green, label=\"egress\"]")
            .count(),
        2
    );
}

#[test]
fn report_counts_and_findings_line_up() {
    let topology = fixture();
    let report = TopologyAnalyzer::new().analyze(&topology);

    assert_eq!(report.summary.total_vnets, 1);
    assert_eq!(report.summary.total_subnets, 2);
    assert_eq!(report.summary.total_nat_gateways, 1);
    assert_eq!(report.summary.address_spaces, vec!["10.0.0.0/16"]);

    // The bare subnet raises the missing-NSG finding, which drives the
    // high-severity recommendation and the attachment recommendation.
    assert!(report
        .findings
        .iter()
        .any(|f| f.resource == "vnet1/bare" && f.description.contains("no network security group")));
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("Attach NSGs")));
}

#[test]
fn report_serializes_for_downstream_emitters() {
    let report = TopologyAnalyzer::new().analyze(&fixture());
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.contains("\"summary\""));
    assert!(json.contains("\"subnetsWithoutNsg\""));
    assert!(json.contains("vnet1/bare"));
}

#[test]
fn snapshot_survives_a_json_round_trip_through_the_pipeline() {
    let topology = fixture();
    let json = topology.to_json().unwrap();
    let reloaded = Topology::from_json(&json).unwrap();

    let original = CanonicalGraph::from_topology(&topology);
    let round_tripped = CanonicalGraph::from_topology(&reloaded);
    assert_eq!(original.node_count(), round_tripped.node_count());
    assert_eq!(original.edge_count(), round_tripped.edge_count());
}
