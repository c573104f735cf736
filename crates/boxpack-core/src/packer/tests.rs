use super::*;

fn bounds() -> SizeBounds {
    SizeBounds::new(1, 20, 1, 20).unwrap()
}

fn rects(dims: &[(u32, u32)]) -> Vec<Rectangle> {
    let bounds = bounds();
    dims.iter()
        .map(|&(w, h)| Rectangle::new(w, h, &bounds).unwrap())
        .collect()
}

fn container(edge_length: u32, dims: &[(u32, u32)]) -> Container {
    let mut container = Container::new(edge_length).unwrap();
    for rect in rects(dims) {
        container.add(rect).unwrap();
    }
    container
}

fn sorted(mut rects: Vec<Rectangle>) -> Vec<Rectangle> {
    rects.sort();
    rects
}

fn request(edge_length: u32, dims: &[(u32, u32)]) -> PackingRequest {
    PackingRequest {
        edge_length,
        bounds: bounds().into(),
        rectangles: dims
            .iter()
            .map(|&(width, height)| RectangleSpec {
                width,
                height,
                quantity: 1,
            })
            .collect(),
        strategy: SelectionStrategy::AreaDesc,
        local_search: true,
    }
}

#[derive(Default)]
struct CountingMonitor {
    placed: usize,
    passes: u64,
    finished: bool,
}

impl PackingMonitor for CountingMonitor {
    fn name(&self) -> &str {
        "CountingMonitor"
    }

    fn on_item_placed(&mut self, processed: usize, _total: usize, _containers: usize) {
        self.placed = processed;
    }

    fn on_pass_end(&mut self, pass: u64, _moved: bool, _containers: usize) {
        self.passes = pass;
    }

    fn on_local_search_end(&mut self, _solution: &Solution, _stats: &LocalSearchStats) {
        self.finished = true;
    }
}

#[test]
fn test_single_large_rectangle() {
    let solution = greedy_pack(&rects(&[(18, 18)]), 20, SelectionStrategy::AreaDesc).unwrap();
    assert_eq!(solution.container_count(), 1);
    assert_eq!(solution.containers()[0].used_area(), 324);
}

#[test]
fn test_single_rectangle_every_strategy() {
    for strategy in SelectionStrategy::ALL {
        let solution = greedy_pack(&rects(&[(3, 7)]), 10, strategy).unwrap();
        assert_eq!(solution.container_count(), 1);

        let improved = local_search(solution).unwrap();
        assert_eq!(improved.container_count(), 1);
    }
}

#[test]
fn test_two_small_squares_share_a_container() {
    let solution = greedy_pack(&rects(&[(6, 6), (6, 6)]), 10, SelectionStrategy::AreaDesc).unwrap();
    assert_eq!(solution.container_count(), 1);
    assert_eq!(solution.containers()[0].used_area(), 72);

    let (improved, stats) = LocalSearch::new().run(solution.clone()).unwrap();
    assert_eq!(improved, solution);
    assert_eq!(stats.moves, 0);
    assert_eq!(stats.passes, 1);
    assert!(stats.converged());
}

#[test]
fn test_two_large_squares_need_two_containers() {
    let solution = greedy_pack(&rects(&[(9, 9), (9, 9)]), 10, SelectionStrategy::AreaDesc).unwrap();
    assert_eq!(solution.container_count(), 2);
    assert!(solution
        .containers()
        .iter()
        .all(|c| c.remaining_area() == 19));

    let (improved, stats) = LocalSearch::new().run(solution.clone()).unwrap();
    assert_eq!(improved, solution);
    assert!(stats.converged());
    assert_eq!(stats.moves, 0);
}

#[test]
fn test_oversized_rectangle_is_infeasible() {
    let err = greedy_pack(&rects(&[(3, 3), (11, 11)]), 10, SelectionStrategy::AreaDesc)
        .unwrap_err();
    assert_eq!(
        err,
        PackError::Infeasible {
            area: 121,
            capacity: 100
        }
    );
    assert_eq!(err.category(), ErrorCategory::Infeasibility);
}

#[test]
fn test_zero_edge_length_is_rejected() {
    assert!(matches!(
        greedy_pack(&rects(&[(1, 1)]), 0, SelectionStrategy::AreaDesc),
        Err(PackError::InvalidInput(_))
    ));
}

#[test]
fn test_greedy_uses_first_container_with_room() {
    // 7x7=49, 6x6=36, 5x5=25, 4x4=16 in capacity 100
    let solution = greedy_pack(
        &rects(&[(4, 4), (6, 6), (5, 5), (7, 7)]),
        10,
        SelectionStrategy::AreaDesc,
    )
    .unwrap();

    let contents: Vec<Vec<u64>> = solution
        .containers()
        .iter()
        .map(|c| c.members().iter().map(Rectangle::area).collect())
        .collect();
    // 25 does not fit after 49+36, but 16 does not fit either (remaining 15)
    assert_eq!(contents, vec![vec![49, 36], vec![25, 16]]);
}

#[test]
fn test_greedy_depends_on_strategy() {
    // Width order puts the 10x2 strip first and splits the 9x9 off
    let input = rects(&[(9, 9), (10, 2), (1, 10)]);

    let by_area = greedy_pack(&input, 10, SelectionStrategy::AreaDesc).unwrap();
    let by_width = greedy_pack(&input, 10, SelectionStrategy::WidthDesc).unwrap();

    assert_eq!(sorted(by_area.rectangles()), sorted(input.clone()));
    assert_eq!(sorted(by_width.rectangles()), sorted(input));
    assert_eq!(by_area.containers()[0].members()[0].area(), 81);
    assert_eq!(by_width.containers()[0].members()[0].width(), 10);
}

#[test]
fn test_local_search_consolidates_containers() {
    let solution = Solution::new(vec![
        container(10, &[(4, 5)]),
        container(10, &[(5, 5)]),
        container(10, &[(3, 3)]),
    ]);
    let before = sorted(solution.rectangles());

    let (improved, stats) = LocalSearch::new().run(solution).unwrap();

    assert_eq!(improved.container_count(), 1);
    assert_eq!(
        improved.containers()[0]
            .members()
            .iter()
            .map(Rectangle::area)
            .collect::<Vec<_>>(),
        vec![9, 25, 20]
    );
    assert_eq!(sorted(improved.rectangles()), before);
    assert_eq!(stats.passes, 4);
    assert_eq!(stats.moves, 3);
    assert_eq!(stats.containers_before, 3);
    assert_eq!(stats.containers_after, 1);
    assert_eq!(stats.outcome, SearchOutcome::Converged);
}

#[test]
fn test_local_search_accepts_moves_that_keep_count() {
    // Moving 2x2 into the second container leaves both containers in use
    let solution = Solution::new(vec![
        container(10, &[(9, 9), (2, 2)]),
        container(10, &[(5, 5)]),
    ]);

    let (improved, stats) = LocalSearch::new().with_max_passes(1).run(solution).unwrap();

    assert_eq!(improved.container_count(), 2);
    assert_eq!(improved.containers()[0].member_count(), 1);
    assert_eq!(improved.containers()[1].member_count(), 2);
    assert_eq!(stats.moves, 1);
    assert_eq!(stats.outcome, SearchOutcome::PassLimit);
}

#[test]
fn test_local_search_stops_when_assignment_repeats() {
    // 50, 30, 30 in capacity 100 keeps rotating through the same six states
    let solution =
        greedy_pack(&rects(&[(5, 10), (5, 6), (6, 5)]), 10, SelectionStrategy::AreaDesc).unwrap();
    assert_eq!(solution.container_count(), 2);
    let before = sorted(solution.rectangles());

    let (improved, stats) = LocalSearch::new().run(solution).unwrap();

    assert_eq!(stats.outcome, SearchOutcome::CycleDetected);
    assert_eq!(stats.passes, 6);
    assert_eq!(stats.moves, 6);
    assert_eq!(improved.container_count(), 2);
    assert!(improved.is_feasible());
    assert_eq!(sorted(improved.rectangles()), before);
}

#[test]
fn test_local_search_on_empty_solution() {
    let (improved, stats) = LocalSearch::new().run(Solution::default()).unwrap();
    assert_eq!(improved.container_count(), 0);
    assert!(stats.converged());
}

#[test]
fn test_monitor_sees_every_step() {
    let mut monitor = CountingMonitor::default();
    let solution = greedy_pack_with_monitor(
        &rects(&[(6, 6), (6, 6), (9, 9)]),
        10,
        SelectionStrategy::AreaDesc,
        &mut monitor,
    )
    .unwrap();
    assert_eq!(monitor.placed, 3);

    let (_, stats) = LocalSearch::new()
        .run_with_monitor(solution, &mut monitor)
        .unwrap();
    assert_eq!(monitor.passes, stats.passes);
    assert!(monitor.finished);
}

#[test]
fn test_packer_end_to_end() {
    let packer = Packer::new(request(10, &[(4, 5), (5, 5), (3, 3), (9, 9)])).unwrap();
    let result = packer.pack().unwrap();

    assert_eq!(result.greedy_containers, 2);
    assert_eq!(result.summary.total_rectangles, 4);
    assert_eq!(result.summary.used_area, 20 + 25 + 9 + 81);
    assert_eq!(result.summary.lower_bound, 2);
    assert_eq!(result.containers.len(), result.summary.total_containers);
    // The 3x3 bounces between both containers
    let stats = result.local_search.unwrap();
    assert_eq!(stats.outcome, SearchOutcome::CycleDetected);
    assert_eq!(stats.passes, 2);
    assert!(result.summary.waste_percentage >= 0.0);
    assert!(result.summary.waste_percentage <= 100.0);
}

#[test]
fn test_packer_without_local_search() {
    let mut req = request(10, &[(6, 6), (6, 6)]);
    req.local_search = false;

    let result = Packer::new(req).unwrap().pack().unwrap();
    assert!(result.local_search.is_none());
    assert_eq!(result.summary.total_containers, 1);
    assert_eq!(result.containers[0].used_area, 72);
    assert_eq!(result.containers[0].remaining_area, 28);
}

#[test]
fn test_packer_expands_quantities() {
    let mut req = request(10, &[]);
    req.rectangles.push(RectangleSpec {
        width: 2,
        height: 3,
        quantity: 4,
    });

    let packer = Packer::new(req).unwrap();
    assert_eq!(packer.rectangles().len(), 4);
    assert_eq!(packer.edge_length(), 10);
}

#[test]
fn test_packer_rejects_invalid_requests() {
    assert!(matches!(
        Packer::new(request(10, &[])),
        Err(PackError::InvalidInput(_))
    ));
    assert!(matches!(
        Packer::new(request(0, &[(1, 1)])),
        Err(PackError::InvalidInput(_))
    ));

    let mut req = request(10, &[(1, 1)]);
    req.rectangles[0].quantity = 0;
    assert!(Packer::new(req).is_err());

    let mut req = request(10, &[(1, 1)]);
    req.bounds.max_width = 1;
    assert!(matches!(
        Packer::new(req),
        Err(PackError::InvalidBounds(_))
    ));

    assert!(matches!(
        Packer::new(request(10, &[(25, 1)])),
        Err(PackError::DimensionOutOfRange { .. })
    ));
}

#[test]
fn test_packer_reports_infeasible_rectangle() {
    let packer = Packer::new(request(10, &[(12, 12)])).unwrap();
    assert!(matches!(
        packer.pack(),
        Err(PackError::Infeasible { .. })
    ));
}

#[test]
fn test_request_defaults_from_json() {
    let json = r#"{
        "edge_length": 20,
        "bounds": { "min_width": 1, "max_width": 10, "min_height": 1, "max_height": 10 },
        "rectangles": [ { "width": 4, "height": 5 } ]
    }"#;
    let req: PackingRequest = serde_json::from_str(json).unwrap();

    assert_eq!(req.strategy, SelectionStrategy::AreaDesc);
    assert!(req.local_search);
    assert_eq!(req.rectangles[0].quantity, 1);
}
