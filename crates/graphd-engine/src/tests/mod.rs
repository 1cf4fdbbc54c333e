//! Unit tests for the graphd-engine crate.

mod support;

mod graph_tests {
    use rstest::rstest;

    use super::support::{build, euler_walk_is_valid};
    use crate::{EulerObstruction, Graph, GraphError, Orientation};

    #[rstest]
    #[case(0)]
    #[case(Graph::MAX_VERTICES + 1)]
    fn rejects_vertex_counts_outside_range(#[case] count: usize) {
        let error = Graph::undirected(count).expect_err("invalid count");
        assert!(matches!(error, GraphError::VertexCount { .. }));
    }

    #[test]
    fn add_edge_is_symmetric_and_idempotent() {
        let mut graph = Graph::undirected(3).expect("graph");
        graph.add_edge(0, 1).expect("edge");
        graph.add_edge(1, 0).expect("duplicate edge");
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn add_edge_rejects_bad_endpoints() {
        let mut graph = Graph::directed(3).expect("graph");
        assert!(matches!(
            graph.add_edge(0, 3),
            Err(GraphError::OutOfRange { .. })
        ));
        assert_eq!(
            graph.add_edge(2, 2),
            Err(GraphError::SelfLoop { vertex: 2 })
        );
    }

    #[test]
    fn invalid_indices_are_tolerated_by_queries() {
        let mut graph = Graph::undirected(2).expect("graph");
        graph.add_edge(0, 1).expect("edge");
        graph.remove_edge(5, 9);
        assert!(graph.neighbors(7).is_empty());
        assert_eq!(graph.degree(7), 0);
        graph.remove_edge(1, 0);
        assert!(!graph.has_edges());
        assert!(graph.neighbors(0).is_empty());
    }

    #[test]
    fn edges_lists_each_undirected_edge_once() {
        let graph = build(Orientation::Undirected, 4, &[(2, 0), (1, 3), (0, 1)]);
        assert_eq!(graph.edges(), vec![(0, 2), (0, 1), (1, 3)]);
    }

    #[rstest]
    #[case(4, Orientation::Undirected, 6)]
    #[case(4, Orientation::Directed, 12)]
    #[case(1, Orientation::Undirected, 0)]
    fn max_edges_matches_simple_graph_bound(
        #[case] vertices: usize,
        #[case] orientation: Orientation,
        #[case] expected: usize,
    ) {
        assert_eq!(Graph::max_edges(vertices, orientation), expected);
    }

    #[test]
    fn isolated_vertices_do_not_break_connectivity() {
        let graph = build(Orientation::Undirected, 5, &[(0, 1), (1, 2)]);
        assert!(graph.is_connected());
        assert!(Graph::undirected(4).expect("graph").is_connected());
    }

    #[test]
    fn directed_connectivity_follows_the_underlying_graph() {
        let graph = build(Orientation::Directed, 3, &[(0, 1), (2, 1)]);
        assert!(graph.is_connected());
        let split = build(Orientation::Directed, 4, &[(0, 1), (2, 3)]);
        assert!(!split.is_connected());
    }

    #[rstest]
    #[case(
        build(Orientation::Undirected, 4, &[(0, 1), (2, 3)]),
        Some(EulerObstruction::Disconnected)
    )]
    #[case(
        build(Orientation::Undirected, 3, &[(0, 1), (1, 2)]),
        Some(EulerObstruction::OddDegree)
    )]
    #[case(
        build(Orientation::Directed, 3, &[(0, 1), (1, 2), (0, 2)]),
        Some(EulerObstruction::UnbalancedDegree)
    )]
    #[case(build(Orientation::Directed, 3, &[(0, 1), (1, 2), (2, 0)]), None)]
    fn euler_obstruction_names_the_failed_condition(
        #[case] graph: Graph,
        #[case] expected: Option<EulerObstruction>,
    ) {
        assert_eq!(graph.euler_obstruction(), expected);
        assert_eq!(graph.has_euler_circuit(), expected.is_none());
    }

    #[rstest]
    #[case(build(Orientation::Undirected, 3, &[(0, 1), (1, 2), (2, 0)]))]
    #[case(build(
        Orientation::Undirected,
        5,
        &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]
    ))]
    #[case(build(
        Orientation::Directed,
        4,
        &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 2)]
    ))]
    #[case(build(
        Orientation::Undirected,
        6,
        &[(1, 2), (2, 3), (3, 1)]
    ))]
    fn euler_circuit_uses_every_edge_once(#[case] graph: Graph) {
        let circuit = graph.find_euler_circuit();
        assert!(
            euler_walk_is_valid(&graph, &circuit),
            "invalid circuit {circuit:?}"
        );
    }

    #[test]
    fn euler_circuit_is_empty_without_a_circuit() {
        let graph = build(Orientation::Undirected, 5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(graph.find_euler_circuit().is_empty());
    }

    #[test]
    fn euler_circuit_does_not_modify_the_graph() {
        let graph = build(Orientation::Undirected, 3, &[(0, 1), (1, 2), (2, 0)]);
        let before = graph.clone();
        let _circuit = graph.find_euler_circuit();
        assert_eq!(graph, before);
    }

    #[test]
    fn display_summarises_adjacency() {
        let graph = build(Orientation::Undirected, 3, &[(0, 1)]);
        assert_eq!(
            graph.to_string(),
            "undirected graph: 3 vertices, 1 edges\n  0: 1\n  1: 0\n  2: (isolated)\n"
        );
    }

    #[test]
    fn transpose_reverses_directed_edges() {
        let graph = build(Orientation::Directed, 3, &[(0, 1), (1, 2)]);
        let reversed = graph.transpose();
        assert!(reversed.has_edge(1, 0));
        assert!(reversed.has_edge(2, 1));
        assert!(!reversed.has_edge(0, 1));
        assert_eq!(graph.in_degrees(), vec![0, 1, 1]);
    }
}

mod engine_tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::support::build;
    use crate::{
        AlgorithmKind, AlgorithmRegistry, Answer, EngineError, ErrorKind, MaxClique, Orientation,
        StronglyConnectedComponents, execute,
    };

    #[test]
    fn orientation_mismatch_is_a_validation_error() {
        let graph = build(Orientation::Undirected, 3, &[(0, 1)]);
        let result = execute(&StronglyConnectedComponents, &graph);
        assert!(!result.success());
        let error = result.error().expect("error");
        assert_eq!(error.kind(), ErrorKind::ValidationError);
        assert_eq!(error.to_string(), "Algorithm requires directed graph");
    }

    #[test]
    fn clique_cap_is_a_capacity_error() {
        let graph = build(Orientation::Undirected, 16, &[]);
        let result = execute(&MaxClique, &graph);
        assert_eq!(
            result.error(),
            Some(&EngineError::capacity(15)),
            "{result:?}"
        );
        assert_eq!(
            result.error().map(ToString::to_string).as_deref(),
            Some("Graph too large for exact algorithm (max 15 vertices)")
        );
    }

    #[rstest]
    #[case(AlgorithmKind::MaxClique, 15)]
    #[case(AlgorithmKind::Hamilton, 12)]
    fn capped_algorithms_accept_graphs_at_the_cap(
        #[case] kind: AlgorithmKind,
        #[case] cap: usize,
    ) {
        let registry = AlgorithmRegistry::default();
        let algorithm = registry.get(kind).expect("registered");
        assert_eq!(algorithm.vertex_cap(), Some(cap));
        let graph = build(Orientation::Undirected, cap, &[]);
        assert!(execute(algorithm, &graph).success());
    }

    #[test]
    fn results_record_algorithm_and_timing() {
        let graph = build(Orientation::Undirected, 3, &[(0, 1), (1, 2), (2, 0)]);
        let result = execute(&MaxClique, &graph);
        assert_eq!(result.algorithm(), AlgorithmKind::MaxClique);
        assert_eq!(result.answer(), Some(&Answer::MaxClique(vec![0, 1, 2])));
        assert!(result.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn every_strategy_has_a_description() {
        let registry = AlgorithmRegistry::default();
        assert!(registry.iter().all(|algorithm| !algorithm.description().is_empty()));
    }
}

mod property_tests {
    use std::collections::HashSet;

    use super::support::{build, reachable};
    use crate::{
        Algorithm, Answer, GraphGenerator, HamiltonCircuit, MaxClique, Orientation,
        StronglyConnectedComponents,
    };

    #[test]
    fn max_clique_is_pairwise_adjacent_across_random_graphs() {
        let generator = GraphGenerator::new(Orientation::Undirected);
        for seed in 0..20 {
            let list = generator.random(9, 18, seed).expect("generate");
            let graph = list.build(Orientation::Undirected).expect("build");
            let Ok(Answer::MaxClique(members)) = MaxClique.solve(&graph) else {
                panic!("expected clique for seed {seed}");
            };
            assert!(!members.is_empty());
            for (index, &u) in members.iter().enumerate() {
                for &v in members.iter().skip(index + 1) {
                    assert!(graph.has_edge(u, v), "seed {seed}: {u}-{v} missing");
                }
            }
        }
    }

    #[test]
    fn hamilton_circuits_visit_every_vertex_once() {
        let generator = GraphGenerator::new(Orientation::Undirected);
        for seed in 0..20 {
            let list = generator.random(7, 14, seed).expect("generate");
            let graph = list.build(Orientation::Undirected).expect("build");
            if let Ok(Answer::HamiltonCircuit(path)) = HamiltonCircuit.solve(&graph) {
                assert_eq!(path.first(), Some(&0));
                assert_eq!(path.last(), Some(&0));
                let distinct: HashSet<_> = path.iter().copied().collect();
                assert_eq!(distinct.len(), graph.vertex_count());
                assert!(path.windows(2).all(|pair| match pair {
                    [u, v] => graph.has_edge(*u, *v),
                    _ => false,
                }));
            }
        }
    }

    #[test]
    fn components_group_exactly_the_mutually_reachable_vertices() {
        let generator = GraphGenerator::new(Orientation::Directed);
        for seed in 0..10 {
            let list = generator.random(8, 12, seed).expect("generate");
            let graph = list.build(Orientation::Directed).expect("build");
            let Ok(Answer::Components(components)) = StronglyConnectedComponents.solve(&graph)
            else {
                panic!("expected components for seed {seed}");
            };
            let mut owner = vec![usize::MAX; graph.vertex_count()];
            for (index, component) in components.iter().enumerate() {
                for &vertex in component {
                    let slot = owner.get_mut(vertex).expect("vertex in range");
                    assert_eq!(*slot, usize::MAX, "vertex {vertex} listed twice");
                    *slot = index;
                }
            }
            assert!(owner.iter().all(|&index| index != usize::MAX));
            for u in 0..graph.vertex_count() {
                for v in 0..graph.vertex_count() {
                    let mutual = reachable(&graph, u, v) && reachable(&graph, v, u);
                    assert_eq!(owner.get(u) == owner.get(v), mutual, "seed {seed}: {u},{v}");
                }
            }
        }
    }

    #[test]
    fn triangle_and_star_scenarios() {
        let triangle = build(Orientation::Undirected, 3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(triangle.has_euler_circuit());
        assert!(matches!(
            HamiltonCircuit.solve(&triangle),
            Ok(Answer::HamiltonCircuit(_))
        ));

        let star = build(Orientation::Undirected, 5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(!star.has_euler_circuit());
        assert_eq!(
            HamiltonCircuit.solve(&star),
            Ok(Answer::NoHamiltonCircuit)
        );
    }
}
