use std::collections::VecDeque;

use tracing::debug;

use crate::error::Result;
use crate::graph::model::GraphModel;
use crate::graph::step::{StepAction, StepRecorder};
use crate::graph::types::TraversalResult;

/// Breadth-first traversal from `start`
///
/// Nodes are marked visited when dequeued. Neighbors are enqueued in input
/// adjacency order, so ties between nodes at the same depth follow the order
/// in which their edges were declared.
#[tracing::instrument(skip(graph, recorder), fields(start = %start))]
pub fn bfs(graph: &GraphModel, start: &str, recorder: &mut StepRecorder) -> Result<TraversalResult> {
    graph.require_nodes("bfs")?;
    let root = graph.require(start)?;

    let mut discovered = vec![false; graph.node_count()];
    let mut order: Vec<usize> = Vec::new();
    let mut queue = VecDeque::from([root]);
    discovered[root] = true;

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let current_id = graph.id(current);
        recorder
            .record(
                StepAction::Visit,
                format!("Dequeue {} and mark it visited", current_id),
            )
            .node(current_id)
            .visited(graph.ids(&order))
            .queue(graph.ids(&queue));

        for adj in graph.neighbors(current) {
            if discovered[adj.node] {
                continue;
            }
            discovered[adj.node] = true;
            queue.push_back(adj.node);

            let neighbor_id = graph.id(adj.node);
            recorder
                .record(
                    StepAction::Discover,
                    format!("Enqueue {} (neighbor of {})", neighbor_id, current_id),
                )
                .node(neighbor_id)
                .edge(current_id, neighbor_id)
                .visited(graph.ids(&order))
                .queue(graph.ids(&queue));
        }
    }

    debug!(visited = order.len(), steps = recorder.len(), "bfs_complete");

    Ok(TraversalResult {
        count: order.len(),
        order: graph.ids(&order),
    })
}

/// Depth-first pre-order traversal from `start`
///
/// Uses an explicit stack rather than recursion. Neighbors are pushed in
/// reverse adjacency order so the first declared neighbor is explored first.
/// A node can sit on the stack more than once; stale pops are recorded as
/// `skip` steps.
#[tracing::instrument(skip(graph, recorder), fields(start = %start))]
pub fn dfs(graph: &GraphModel, start: &str, recorder: &mut StepRecorder) -> Result<TraversalResult> {
    graph.require_nodes("dfs")?;
    let root = graph.require(start)?;

    let mut visited = vec![false; graph.node_count()];
    let mut order: Vec<usize> = Vec::new();
    let mut stack = vec![root];

    while let Some(current) = stack.pop() {
        let current_id = graph.id(current);

        if visited[current] {
            recorder
                .record(
                    StepAction::Skip,
                    format!("Pop {} again; already visited", current_id),
                )
                .node(current_id)
                .visited(graph.ids(&order))
                .stack(graph.ids(&stack));
            continue;
        }

        visited[current] = true;
        order.push(current);
        recorder
            .record(
                StepAction::Visit,
                format!("Pop {} and mark it visited", current_id),
            )
            .node(current_id)
            .visited(graph.ids(&order))
            .stack(graph.ids(&stack));

        for adj in graph.neighbors(current).iter().rev() {
            if visited[adj.node] {
                continue;
            }
            stack.push(adj.node);

            let neighbor_id = graph.id(adj.node);
            recorder
                .record(
                    StepAction::Discover,
                    format!("Push {} (neighbor of {})", neighbor_id, current_id),
                )
                .node(neighbor_id)
                .edge(current_id, neighbor_id)
                .visited(graph.ids(&order))
                .stack(graph.ids(&stack));
        }
    }

    debug!(visited = order.len(), steps = recorder.len(), "dfs_complete");

    Ok(TraversalResult {
        count: order.len(),
        order: graph.ids(&order),
    })
}
