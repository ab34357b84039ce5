//! Property tests against exhaustive enumeration on small instances.

use proptest::prelude::*;
use u_knapsack::bnb::{BnbConfig, BnbRunner, RatioTable, Traversal};
use u_knapsack::dispatch::{SolveConfig, Solver, Strategy as SolveStrategy};
use u_knapsack::dp::DpSolver;
use u_knapsack::ga::{Candidate, GaConfig, GaRunner};
use u_knapsack::model::{Item, ProblemInstance};

fn brute_force(instance: &ProblemInstance) -> u64 {
    let n = instance.len();
    let mut best = 0;
    for mask in 0u32..(1 << n) {
        let mut value = 0;
        let mut weight = 0;
        for i in 0..n {
            if mask & (1 << i) != 0 {
                value += instance.item(i).value;
                weight += instance.item(i).weight;
            }
        }
        if weight <= instance.capacity() {
            best = best.max(value);
        }
    }
    best
}

fn instance_strategy() -> impl Strategy<Value = ProblemInstance> {
    (
        0u64..120,
        prop::collection::vec((0u64..60, 0u64..40), 0..=12),
    )
        .prop_map(|(capacity, items)| {
            let items = items.into_iter().map(|(v, w)| Item::new(v, w)).collect();
            ProblemInstance::new(capacity, items).unwrap()
        })
}

fn scaled_instance_strategy() -> impl Strategy<Value = ProblemInstance> {
    (instance_strategy(), 1u64..6).prop_map(|(inst, factor)| {
        let items = inst
            .items()
            .iter()
            .map(|it| Item::new(it.value, it.weight * factor))
            .collect();
        ProblemInstance::new(inst.capacity() * factor + factor / 2, items).unwrap()
    })
}

fn assert_solution(instance: &ProblemInstance, items: &[usize], value: u64) {
    assert!(instance.is_feasible(items), "infeasible item set {items:?}");
    assert_eq!(instance.value_of(items), value);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_dp_matches_brute_force(inst in instance_strategy()) {
        let result = DpSolver::solve(&inst);
        prop_assert_eq!(result.value, brute_force(&inst));
        assert_solution(&inst, &result.items, result.value);
    }

    #[test]
    fn prop_bnb_matches_brute_force(inst in instance_strategy(), seed_greedy in any::<bool>()) {
        let optimum = brute_force(&inst);
        for traversal in [Traversal::DepthFirst, Traversal::BestFirst, Traversal::Hybrid] {
            let config = BnbConfig::default()
                .with_traversal(traversal)
                .with_seed_greedy(seed_greedy)
                .with_hybrid_frontier_limit(4);
            let result = BnbRunner::run(&inst, &config);
            prop_assert!(result.optimal);
            prop_assert_eq!(result.value, optimum, "traversal {:?}", traversal);
            assert_solution(&inst, &result.items, result.value);
        }
    }

    #[test]
    fn prop_bound_is_sound(inst in instance_strategy(), mask in any::<u16>(), depth_pick in any::<usize>()) {
        let table = RatioTable::new(&inst);
        let n = table.len();
        let depth = if n == 0 { 0 } else { depth_pick % (n + 1) };

        let mut sv = 0;
        let mut sw = 0;
        for k in 0..depth {
            if mask & (1 << k) != 0 {
                sv += table.value(k);
                sw += table.weight(k);
            }
        }
        prop_assume!(sw <= table.capacity());

        // best completion over the undecided positions
        let rest = n - depth;
        let mut best = 0;
        for sub in 0u32..(1 << rest) {
            let mut v = 0;
            let mut w = sw;
            for j in 0..rest {
                if sub & (1 << j) != 0 {
                    v += table.value(depth + j);
                    w += table.weight(depth + j);
                }
            }
            if w <= table.capacity() {
                best = best.max(v);
            }
        }

        prop_assert!(table.bound(sv, sw, depth) >= sv + best);
    }

    #[test]
    fn prop_gcd_reduction_is_idempotent_and_exact(inst in scaled_instance_strategy()) {
        let once = inst.reduce_by_gcd();
        let twice = once.instance.reduce_by_gcd();
        prop_assert_eq!(twice.divisor, 1);
        prop_assert_eq!(&twice.instance, &once.instance);
        prop_assert_eq!(brute_force(&once.instance), brute_force(&inst));

        // same optimum and the same item set, with and without the reduction
        let scaled = DpSolver::solve(&inst);
        let reduced = DpSolver::solve(&once.instance);
        prop_assert_eq!(scaled.value, reduced.value);
        prop_assert_eq!(&scaled.items, &reduced.items);

        let config = SolveConfig::default();
        let original = Solver::solve_with(&inst, &config, SolveStrategy::Dp).unwrap();
        let divided = Solver::solve_with(&once.instance, &config, SolveStrategy::Dp).unwrap();
        prop_assert_eq!(original.value, divided.value);
        prop_assert_eq!(&original.assignment, &divided.assignment);
        prop_assert_eq!(original.items(), scaled.items);
    }

    #[test]
    fn prop_dispatcher_matches_brute_force(inst in scaled_instance_strategy()) {
        let solution = Solver::solve(&inst, &SolveConfig::default()).unwrap();
        prop_assert!(solution.optimal);
        prop_assert_eq!(solution.value, brute_force(&inst));
        prop_assert_eq!(solution.assignment.len(), inst.len());
        prop_assert!(solution.weight(&inst) <= inst.capacity());
    }

    #[test]
    fn prop_candidate_partition_invariant(
        inst in instance_strategy(),
        start in prop::collection::vec(0usize..14, 0..8),
        ops in prop::collection::vec(
            (prop::collection::vec(0usize..14, 0..4), prop::collection::vec(0usize..14, 0..4)),
            0..10,
        ),
    ) {
        let n = inst.len();
        let mut c = Candidate::from_elements(&inst, start);
        for (add, remove) in ops {
            c.update(&inst, &add, &remove);

            prop_assert!(c.elements().is_disjoint(c.complement()));
            prop_assert_eq!(c.elements().len() + c.complement().len(), n);
            prop_assert!(c.elements().iter().chain(c.complement()).all(|&i| i < n));
            prop_assert_eq!(c.value(), inst.value_of(c.elements()));
            prop_assert_eq!(
                c.remaining_capacity(),
                inst.capacity() as i128 - inst.weight_of(c.elements()) as i128
            );
        }
    }

    #[test]
    fn prop_repair_is_feasible_and_maximal(
        inst in instance_strategy(),
        start in prop::collection::vec(0usize..12, 0..12),
    ) {
        let mut c = Candidate::from_elements(&inst, start);
        c.repair(&inst);

        prop_assert!(c.is_feasible());
        for &i in c.complement() {
            prop_assert!(inst.item(i).weight as i128 > c.remaining_capacity());
        }
        prop_assert_eq!(c.clone(), Candidate::from_elements(&inst, c.key()));
    }

    #[test]
    fn prop_population_search_stays_feasible(inst in instance_strategy(), seed in any::<u64>()) {
        let config = GaConfig::fast()
            .with_population_size(20)
            .with_seed_rounds(20)
            .with_max_iterations(100)
            .with_seed(seed);
        let result = GaRunner::run(&inst, &config);

        prop_assert!(result.best.is_feasible());
        prop_assert!(result.best_value <= brute_force(&inst));
        assert_solution(&inst, &result.items(), result.best_value);
    }
}
