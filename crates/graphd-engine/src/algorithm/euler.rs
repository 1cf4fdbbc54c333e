use crate::algorithm::{Algorithm, AlgorithmKind, Answer};
use crate::error::EngineError;
use crate::graph::Graph;

/// Euler circuit search. Accepts either orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerCircuit;

impl Algorithm for EulerCircuit {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Euler
    }

    fn description(&self) -> &'static str {
        "Euler circuit (Hierholzer)"
    }

    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError> {
        if let Some(reason) = graph.euler_obstruction() {
            return Ok(Answer::NoEulerCircuit(reason));
        }
        Ok(Answer::EulerCircuit(graph.find_euler_circuit()))
    }
}
