//! Mapping the final stars back onto the caller's matrix

use serde::{Deserialize, Serialize};

use super::marks::StarMap;
use super::matrix::CostMatrix;
use super::step::Step;

/// One agent (row) matched to one task (column), both original indices
///
/// Serialized as a `[agent, task]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Assignment {
    pub agent: usize,
    pub task: usize,
}

impl From<(usize, usize)> for Assignment {
    fn from((agent, task): (usize, usize)) -> Self {
        Self { agent, task }
    }
}

impl From<Assignment> for (usize, usize) {
    fn from(a: Assignment) -> Self {
        (a.agent, a.task)
    }
}

/// Outcome of a solve
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    /// Real agent/task pairs, ordered by agent
    pub assignments: Vec<Assignment>,

    /// Sum of the original costs over `assignments`
    pub total_cost: f64,

    /// Number of agents in the input
    pub agent_count: usize,

    /// Number of tasks in the input
    pub task_count: usize,

    /// Dimension of the padded working matrix
    pub size: usize,

    /// Every star of the padded matrix, dummy rows/columns included
    pub starred_pairs: Vec<(usize, usize)>,

    /// Ordered trace, empty when recording was disabled
    pub steps: Vec<Step>,
}

impl AssignmentResult {
    /// Task assigned to `agent`, or None if the agent is idle or out of range
    pub fn task_for(&self, agent: usize) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.agent == agent)
            .map(|a| a.task)
    }

    /// Agents matched to a dummy column
    pub fn unassigned_agents(&self) -> Vec<usize> {
        self.starred_pairs
            .iter()
            .filter(|&&(row, col)| row < self.agent_count && col >= self.task_count)
            .map(|&(row, _)| row)
            .collect()
    }

    /// Tasks matched to a dummy row
    pub fn unassigned_tasks(&self) -> Vec<usize> {
        let mut tasks: Vec<_> = self
            .starred_pairs
            .iter()
            .filter(|&&(row, col)| row >= self.agent_count && col < self.task_count)
            .map(|&(_, col)| col)
            .collect();
        tasks.sort_unstable();
        tasks
    }
}

/// Keeps stars inside the original bounds and sums their original costs
pub(crate) fn extract(costs: &CostMatrix, stars: &StarMap, steps: Vec<Step>) -> AssignmentResult {
    let starred_pairs = stars.pairs();
    let (agent_count, task_count) = (costs.row_count(), costs.col_count());

    let assignments: Vec<Assignment> = starred_pairs
        .iter()
        .filter(|&&(row, col)| row < agent_count && col < task_count)
        .map(|&pair| Assignment::from(pair))
        .collect();

    let total_cost = assignments
        .iter()
        .map(|a| costs.get(a.agent, a.task))
        .sum();

    AssignmentResult {
        assignments,
        total_cost,
        agent_count,
        task_count,
        size: costs.padded_size(),
        starred_pairs,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(size: usize, pairs: &[(usize, usize)]) -> StarMap {
        let mut map = StarMap::new(size);
        for &(r, c) in pairs {
            assert!(map.try_star(r, c));
        }
        map
    }

    #[test]
    fn drops_dummy_column_matches() {
        let costs = CostMatrix::new(vec![vec![4.0, 2.0], vec![1.0, 3.0], vec![5.0, 6.0]]).unwrap();
        let result = extract(&costs, &stars(3, &[(0, 1), (1, 0), (2, 2)]), vec![]);

        assert_eq!(result.starred_pairs.len(), 3);
        assert_eq!(
            result.assignments,
            vec![Assignment { agent: 0, task: 1 }, Assignment { agent: 1, task: 0 }]
        );
        assert_eq!(result.total_cost, 3.0);
        assert_eq!(result.unassigned_agents(), vec![2]);
        assert!(result.unassigned_tasks().is_empty());
        assert_eq!(result.task_for(2), None);
        assert_eq!(result.task_for(0), Some(1));
    }

    #[test]
    fn drops_dummy_row_matches() {
        let costs = CostMatrix::new(vec![vec![8.0, 1.0, 9.0]]).unwrap();
        let result = extract(&costs, &stars(3, &[(0, 1), (1, 2), (2, 0)]), vec![]);

        assert_eq!(result.assignments, vec![Assignment { agent: 0, task: 1 }]);
        assert_eq!(result.total_cost, 1.0);
        assert_eq!(result.unassigned_tasks(), vec![0, 2]);
        assert!(result.unassigned_agents().is_empty());
    }

    #[test]
    fn assignments_serialize_as_pairs() {
        let costs = CostMatrix::new(vec![vec![2.0]]).unwrap();
        let result = extract(&costs, &stars(1, &[(0, 0)]), vec![]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["assignments"], serde_json::json!([[0, 0]]));
        assert_eq!(json["totalCost"], 2.0);
        assert_eq!(json["starredPairs"], serde_json::json!([[0, 0]]));
    }
}
