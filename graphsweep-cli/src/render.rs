//! Plain-text rendering of trial payloads and sweep point reports.

use std::io::Write;

use graphsweep_core::{PointOutcome, SweepPointReport, Trial, TrialPayload};

/// Writes the payload of one trial as a block headed by its repetition.
///
/// Shortest-path blocks list `node,distance,path` with `inf` and an empty
/// path for unreachable nodes. Spanning-tree blocks list
/// `source,target,weight` followed by the total weight.
///
/// # Errors
/// Propagates write failures.
pub fn write_trial(trial: &Trial, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "# repetition {}", trial.repetition())?;
    match trial.payload() {
        TrialPayload::ShortestPaths(result) => {
            writeln!(writer, "# source {}", result.source())?;
            writeln!(writer, "node,distance,path")?;
            for ((node, distance), (_, path)) in result.distances().iter().zip(result.paths().iter()) {
                let distance = distance.map_or_else(|| "inf".to_owned(), |d| d.to_string());
                let path = path
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(writer, "{node},{distance},{path}")?;
            }
        }
        TrialPayload::SpanningTree(tree) => {
            writeln!(writer, "source,target,weight")?;
            for edge in tree.edges() {
                writeln!(writer, "{},{},{}", edge.source(), edge.target(), edge.weight())?;
            }
            writeln!(
                writer,
                "# total_weight {} rounds {}",
                tree.total_weight(),
                tree.rounds()
            )?;
        }
    }
    Ok(())
}

/// Writes a human-readable account of a sweep point.
///
/// # Errors
/// Propagates write failures.
pub fn write_report(report: &SweepPointReport, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "{}", report.point())?;
    match report.outcome() {
        PointOutcome::Completed(trials) => {
            writeln!(
                writer,
                "graph: {} nodes, {} edges ({} removed)",
                trials.node_count(),
                trials.edge_count(),
                trials.removed_edges()
            )?;
            for trial in trials.trials() {
                write_trial(trial, &mut writer)?;
            }
            writeln!(
                writer,
                "elapsed: total {} ns, average {} ns",
                trials.total_elapsed().as_nanos(),
                trials.average_elapsed().as_nanos()
            )?;
        }
        PointOutcome::Skipped(reason) => writeln!(writer, "skipped: {reason}")?,
        PointOutcome::Failed(error) => writeln!(writer, "failed [{}]: {}", error.code(), error.kind())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use graphsweep_core::{
        Algorithm, Edge, ExperimentBuilder, ExperimentInput, Graph, Orientation,
        StaticGraphSource,
    };

    fn single_report(algorithm: Algorithm, removal: u8) -> SweepPointReport {
        let graph = Graph::from_edges(
            Orientation::Directed,
            [Edge::new(0, 1, 4), Edge::new(1, 2, 1), Edge::new(2, 0, 2), Edge::new(3, 0, 1)],
        )
        .expect("graph is valid");
        let source = StaticGraphSource::new("fixture", graph);
        let experiment = ExperimentBuilder::new()
            .with_removal_percentages([removal])
            .build()
            .expect("experiment is valid");
        let mut reports: Vec<SweepPointReport> = Vec::new();
        experiment
            .run(&[ExperimentInput::new(&source, algorithm)], &mut reports)
            .expect("in-memory sink never fails");
        reports.remove(0)
    }

    fn render(report: &SweepPointReport) -> String {
        let mut out = Vec::new();
        write_report(report, &mut out).expect("writing to memory succeeds");
        String::from_utf8(out).expect("output is utf-8")
    }

    #[test]
    fn shortest_path_blocks_list_every_node() {
        let report = single_report(Algorithm::ShortestPath, 0);
        let text = render(&report);
        assert!(text.contains("# repetition 1\n# source 0\nnode,distance,path\n"));
        assert!(text.contains("0,0,0\n1,4,0 1\n2,5,0 1 2\n3,inf,\n"));
        assert!(text.contains("graph: 4 nodes, 4 edges (0 removed)"));
    }

    #[test]
    fn spanning_tree_blocks_end_with_total() {
        let report = single_report(Algorithm::SpanningTree, 0);
        let text = render(&report);
        assert!(text.contains("source,target,weight\n0,3,1\n1,2,1\n0,2,2\n"));
        assert!(text.contains("# total_weight 4 rounds"));
    }

    #[test]
    fn failed_points_show_their_code() {
        // Node 3 has no incoming edge, so no directed removal keeps it
        // strongly connected.
        let report = single_report(Algorithm::ShortestPath, 50);
        let text = render(&report);
        assert!(text.contains("failed [PRUNE_UNSATISFIABLE]"), "{text}");
    }
}
