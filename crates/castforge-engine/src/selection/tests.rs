//! Tests for cast selection.

use castforge_config::{BalanceSolverType, BalancingConfig};
use castforge_core::{AlternativeCast, Applicant, CastError, CastGroup, SameCastSet};
use castforge_test::{balance_fixture, lead_fixture, revue, BalanceFixture, Revue};

use super::*;
use crate::applicant_engine::WeightedSumEngine;

fn heuristic() -> HeuristicSelectionEngine {
    HeuristicSelectionEngine::new(Box::new(WeightedSumEngine::new()))
}

fn chunked(balancing: BalancingConfig) -> ChunkedPairsSatEngine {
    ChunkedPairsSatEngine::new(Box::new(WeightedSumEngine::new()), balancing)
}

fn named(r: &Revue, name: &str) -> ApplicantId {
    r.applicants
        .iter()
        .copied()
        .find(|&a| r.show.applicant(a).first_name == name)
        .expect("applicant in revue")
}

fn names(r: &Revue, filter: impl Fn(&Applicant) -> bool) -> Vec<String> {
    r.applicants
        .iter()
        .map(|&a| r.show.applicant(a))
        .filter(|a| filter(a))
        .map(|a| a.first_name.clone())
        .collect()
}

fn selected_revue() -> Revue {
    let mut r = revue();
    let applicants = r.applicants.clone();
    heuristic().select_cast_groups(&mut r.show, &applicants);
    r
}

fn cast_of(f: &BalanceFixture, index: usize) -> Option<AlternativeCastId> {
    f.show.applicant(f.applicants[index]).alternative_cast
}

fn cast_sizes(f: &BalanceFixture) -> [usize; 2] {
    let count = |cast| {
        (0..f.applicants.len())
            .filter(|&i| cast_of(f, i) == Some(cast))
            .count()
    };
    [count(f.casts[0]), count(f.casts[1])]
}

#[test]
fn test_select_cast_groups_fills_groups_by_overall_ability() {
    let mut r = revue();
    let applicants = r.applicants.clone();
    let accepted = heuristic().select_cast_groups(&mut r.show, &applicants);
    assert_eq!(accepted, 12);

    let principals = r.principals;
    let ensemble = r.ensemble;
    assert_eq!(
        names(&r, |a| a.cast_group == Some(principals)),
        ["Ada", "Ben", "Cal", "Dee"]
    );
    assert_eq!(
        names(&r, |a| a.cast_group == Some(ensemble)),
        ["Eve", "Finn", "Gia", "Hal", "Ivy", "Jon", "Kai", "Lux"]
    );
    assert_eq!(
        names(&r, |a| a.cast_group.is_none()),
        ["Max", "Noa", "Oli", "Pia"]
    );
}

#[test]
fn test_group_requirements_gate_acceptance() {
    let r = selected_revue();
    // Eve has acting 40, below the principals' minimum.
    let eve = r.show.applicant(named(&r, "Eve"));
    assert_eq!(eve.cast_group, Some(r.ensemble));
    for name in ["Ada", "Ben", "Cal", "Dee"] {
        assert!(r.show.applicant(named(&r, name)).mark_for(r.acting) >= 50);
    }
}

#[test]
fn test_rejected_applicants_lose_number_tags_and_cast() {
    let mut r = revue();
    let max = named(&r, "Max");
    {
        let a = r.show.applicant_mut(max);
        a.cast_number = Some(9);
        a.tags.insert(r.featured);
        a.alternative_cast = Some(r.casts[0]);
    }
    let applicants = r.applicants.clone();
    heuristic().select_cast_groups(&mut r.show, &applicants);

    let a = r.show.applicant(max);
    assert_eq!(a.cast_group, None);
    assert_eq!(a.cast_number, None);
    assert!(a.tags.is_empty());
    assert_eq!(a.alternative_cast, None);
}

#[test]
fn test_select_cast_groups_keeps_existing_members() {
    let mut r = revue();
    let pia = named(&r, "Pia");
    r.show.applicant_mut(pia).cast_group = Some(r.ensemble);
    let applicants = r.applicants.clone();
    let accepted = heuristic().select_cast_groups(&mut r.show, &applicants);

    assert_eq!(accepted, 11);
    assert_eq!(r.show.applicant(pia).cast_group, Some(r.ensemble));
    assert_eq!(r.show.applicant(named(&r, "Lux")).cast_group, None);
}

#[test]
fn test_group_without_required_count_takes_everyone_eligible() {
    let mut show = Show::new("Open call");
    let group = show.add_cast_group(CastGroup::new("Everyone"));
    let applicants: Vec<ApplicantId> = (0..3)
        .map(|i| show.add_applicant(Applicant::new(format!("A{i}"), "")))
        .collect();

    assert_eq!(heuristic().select_cast_groups(&mut show, &applicants), 3);
    assert!(applicants
        .iter()
        .all(|&a| show.applicant(a).cast_group == Some(group)));
}

#[test]
fn test_heuristic_balance_alternates_by_overall_ability() {
    let mut r = selected_revue();
    let applicants = r.applicants.clone();
    let report = heuristic()
        .balance_alternative_casts(&mut r.show, &applicants)
        .unwrap();
    assert_eq!(report.assigned, 12);
    assert!(report.attempts.is_empty());

    let red = r.casts[0];
    let blue = r.casts[1];
    assert_eq!(
        names(&r, |a| a.alternative_cast == Some(red)),
        ["Ada", "Cal", "Eve", "Gia", "Jon", "Kai"]
    );
    assert_eq!(
        names(&r, |a| a.alternative_cast == Some(blue)),
        ["Ben", "Dee", "Finn", "Hal", "Ivy", "Lux"]
    );
}

#[test]
fn test_heuristic_balance_supports_more_than_two_casts() {
    let mut f = balance_fixture(&[90, 80, 70, 60, 50, 40]);
    let third = f.show.add_alternative_cast(AlternativeCast::new("Green"));
    let applicants = f.applicants.clone();
    heuristic()
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    for cast in [f.casts[0], f.casts[1], third] {
        let members = (0..6).filter(|&i| cast_of(&f, i) == Some(cast)).count();
        assert_eq!(members, 2);
    }
}

#[test]
fn test_heuristic_balance_keeps_same_cast_sets_together() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    f.show
        .add_same_cast_set(SameCastSet::new([f.applicants[0], f.applicants[1]]));
    let applicants = f.applicants.clone();
    heuristic()
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    assert_eq!(cast_of(&f, 0), Some(f.casts[0]));
    assert_eq!(cast_of(&f, 1), Some(f.casts[0]));
    assert_eq!(cast_of(&f, 2), Some(f.casts[1]));
    assert_eq!(cast_of(&f, 3), Some(f.casts[1]));
}

#[test]
fn test_chunked_balance_splits_each_ranked_pair() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    assert!(!report.fell_back);
    assert_eq!(report.solved_chunk_size(), Some(2));
    assert_eq!(report.assigned, 4);
    assert_ne!(cast_of(&f, 0), cast_of(&f, 1));
    assert_ne!(cast_of(&f, 2), cast_of(&f, 3));
    assert_eq!(cast_sizes(&f), [2, 2]);
}

#[test]
fn test_chunked_balance_keeps_same_cast_sets_together() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    f.show
        .add_same_cast_set(SameCastSet::new([f.applicants[0], f.applicants[1]]));
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    assert!(!report.fell_back);
    assert_eq!(cast_of(&f, 0), cast_of(&f, 1));
    assert_eq!(cast_of(&f, 2), cast_of(&f, 3));
    assert_ne!(cast_of(&f, 0), cast_of(&f, 2));
    assert_eq!(cast_sizes(&f), [2, 2]);
}

#[test]
fn test_chunked_balance_respects_existing_casts() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    f.show.applicant_mut(f.applicants[1]).alternative_cast = Some(f.casts[0]);
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    assert_eq!(report.assigned, 3);
    assert_eq!(cast_of(&f, 1), Some(f.casts[0]));
    assert!((0..4).all(|i| cast_of(&f, i).is_some()));
}

#[test]
fn test_chunked_balance_falls_back_when_unsolvable() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    f.show.applicant_mut(f.applicants[0]).alternative_cast = Some(f.casts[0]);
    f.show.applicant_mut(f.applicants[1]).alternative_cast = Some(f.casts[1]);
    // Already split, so keeping them together cannot be satisfied.
    f.show
        .add_same_cast_set(SameCastSet::new([f.applicants[0], f.applicants[1]]));
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut f.show, &applicants)
        .unwrap();

    assert!(report.fell_back);
    assert_eq!(report.attempts.len(), 1);
    assert!(!report.attempts[0].solved);
    assert_eq!(report.solved_chunk_size(), None);
    assert_eq!(report.assigned, 2);
    assert_eq!(cast_of(&f, 2), Some(f.casts[0]));
    assert_eq!(cast_of(&f, 3), Some(f.casts[1]));
}

#[test]
fn test_chunked_balance_rejects_zero_chunk_increment() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    f.show.applicant_mut(f.applicants[0]).alternative_cast = Some(f.casts[0]);
    f.show.applicant_mut(f.applicants[1]).alternative_cast = Some(f.casts[1]);
    f.show
        .add_same_cast_set(SameCastSet::new([f.applicants[0], f.applicants[1]]));
    let applicants = f.applicants.clone();
    let balancing = BalancingConfig {
        chunk_increment: 0,
        ..BalancingConfig::default()
    };

    let result = chunked(balancing).balance_alternative_casts(&mut f.show, &applicants);

    assert!(matches!(result, Err(CastError::Config(_))));
    assert_eq!(cast_of(&f, 2), None);
    assert_eq!(cast_of(&f, 3), None);
}

#[test]
fn test_chunked_balance_rejects_odd_initial_chunk_size() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    let applicants = f.applicants.clone();
    let balancing = BalancingConfig {
        initial_chunk_size: 3,
        ..BalancingConfig::default()
    };

    let result = chunked(balancing).balance_alternative_casts(&mut f.show, &applicants);

    assert!(matches!(result, Err(CastError::Config(_))));
}

#[test]
fn test_chunked_balance_needs_exactly_two_casts() {
    let mut f = balance_fixture(&[90, 80]);
    f.show.add_alternative_cast(AlternativeCast::new("Green"));
    let applicants = f.applicants.clone();
    let result = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut f.show, &applicants);

    assert!(matches!(result, Err(CastError::InvalidState(_))));
    assert_eq!(cast_of(&f, 0), None);
}

#[test]
fn test_chunked_balance_with_theory_solver() {
    let mut f = balance_fixture(&[90, 80, 70, 60, 50, 40]);
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig {
        solver: BalanceSolverType::DpllTheory,
        ..BalancingConfig::default()
    })
    .balance_alternative_casts(&mut f.show, &applicants)
    .unwrap();

    assert_eq!(report.solved_chunk_size(), Some(2));
    assert_eq!(cast_sizes(&f), [3, 3]);
}

#[test]
fn test_chunked_balance_with_branch_and_bound_minimises_gap() {
    let marks = [90, 80, 70, 60, 50, 40];
    let mut f = balance_fixture(&marks);
    let applicants = f.applicants.clone();
    let report = chunked(BalancingConfig {
        solver: BalanceSolverType::BranchAndBound,
        ..BalancingConfig::default()
    })
    .balance_alternative_casts(&mut f.show, &applicants)
    .unwrap();
    assert!(!report.fell_back);

    let total = |cast| -> i64 {
        (0..marks.len())
            .filter(|&i| cast_of(&f, i) == Some(cast))
            .map(|i| i64::from(marks[i]))
            .sum()
    };
    // Each ranked pair differs by 10, so the best split is off by 10.
    assert_eq!((total(f.casts[0]) - total(f.casts[1])).abs(), 10);
    assert_eq!(cast_sizes(&f), [3, 3]);
}

#[test]
fn test_chunked_balance_splits_the_revue_evenly() {
    let mut r = selected_revue();
    let applicants = r.applicants.clone();
    let report = chunked(BalancingConfig::default())
        .balance_alternative_casts(&mut r.show, &applicants)
        .unwrap();
    assert!(!report.fell_back);
    assert_eq!(report.assigned, 12);

    for (group, per_cast) in [(r.principals, 2), (r.ensemble, 4)] {
        for cast in r.casts {
            let members = r
                .applicants
                .iter()
                .filter(|&&a| {
                    let a = r.show.applicant(a);
                    a.cast_group == Some(group) && a.alternative_cast == Some(cast)
                })
                .count();
            assert_eq!(members, per_cast);
        }
    }
    // Rejected applicants stay out of every cast.
    assert_eq!(r.show.applicant(named(&r, "Pia")).alternative_cast, None);
}

#[test]
fn test_cast_numbers_are_allocated_per_alternative_cast() {
    let mut f = balance_fixture(&[90, 80, 70, 60, 50]);
    let [red, blue] = f.casts;
    for (i, cast) in [red, blue, red, blue].into_iter().enumerate() {
        f.show.applicant_mut(f.applicants[i]).alternative_cast = Some(cast);
    }
    let applicants = f.applicants.clone();
    heuristic().allocate_cast_numbers(&mut f.show, &applicants, None, SortDirection::Descending);

    let numbers: Vec<Option<u32>> = applicants
        .iter()
        .map(|&a| f.show.applicant(a).cast_number)
        .collect();
    // Buddies share a number; the unassigned member clashes with both casts.
    assert_eq!(numbers, [Some(1), Some(1), Some(2), Some(2), Some(3)]);
}

#[test]
fn test_existing_cast_numbers_are_kept() {
    let mut f = balance_fixture(&[90, 80]);
    let [red, _] = f.casts;
    for &a in &f.applicants {
        f.show.applicant_mut(a).alternative_cast = Some(red);
    }
    f.show.applicant_mut(f.applicants[1]).cast_number = Some(1);
    let applicants = f.applicants.clone();
    heuristic().allocate_cast_numbers(&mut f.show, &applicants, None, SortDirection::Descending);

    assert_eq!(f.show.applicant(f.applicants[0]).cast_number, Some(2));
    assert_eq!(f.show.applicant(f.applicants[1]).cast_number, Some(1));
}

#[test]
fn test_cast_numbers_follow_criteria_and_direction() {
    let mut f = lead_fixture();
    let acting = f.show.criteria_ids().next().expect("acting criteria");
    let applicants = f.applicants.clone();
    heuristic().allocate_cast_numbers(
        &mut f.show,
        &applicants,
        Some(acting),
        SortDirection::Ascending,
    );

    let numbers: Vec<Option<u32>> = applicants
        .iter()
        .map(|&a| f.show.applicant(a).cast_number)
        .collect();
    // Marks 90, 50, 20.
    assert_eq!(numbers, [Some(3), Some(2), Some(1)]);
}

#[test]
fn test_cast_numbers_are_unique_across_groups() {
    let mut show = Show::new("Two groups");
    let leads = show.add_cast_group(CastGroup::new("Leads"));
    let chorus = show.add_cast_group(CastGroup::new("Chorus"));
    let mut add = |name: &str, group| {
        let mut applicant = Applicant::new(name, "");
        applicant.cast_group = Some(group);
        show.add_applicant(applicant)
    };
    let lead = add("Lead", leads);
    let singer = add("Singer", chorus);
    let dancer = add("Dancer", chorus);
    show.applicant_mut(dancer).cast_number = Some(2);
    let applicants = vec![lead, singer, dancer];
    heuristic().allocate_cast_numbers(&mut show, &applicants, None, SortDirection::Descending);

    assert_eq!(show.applicant(lead).cast_number, Some(1));
    assert_eq!(show.applicant(singer).cast_number, Some(3));
    assert_eq!(show.applicant(dancer).cast_number, Some(2));
}

#[test]
fn test_rejected_applicants_get_no_cast_number() {
    let mut r = selected_revue();
    let applicants = r.applicants.clone();
    heuristic()
        .balance_alternative_casts(&mut r.show, &applicants)
        .unwrap();
    heuristic().allocate_cast_numbers(&mut r.show, &applicants, None, SortDirection::Descending);

    assert_eq!(r.show.applicant(named(&r, "Max")).cast_number, None);
    assert_eq!(r.show.applicant(named(&r, "Ada")).cast_number, Some(1));
    assert_eq!(r.show.applicant(named(&r, "Ben")).cast_number, Some(1));
    assert_eq!(r.show.applicant(named(&r, "Eve")).cast_number, Some(3));
}

#[test]
fn test_tags_respect_per_cast_limits_and_requirements() {
    let mut r = selected_revue();
    let applicants = r.applicants.clone();
    let engine = heuristic();
    engine
        .balance_alternative_casts(&mut r.show, &applicants)
        .unwrap();

    assert_eq!(engine.apply_tags(&mut r.show, &applicants), 6);
    let featured = r.featured;
    assert_eq!(
        names(&r, |a| a.tags.contains(&featured)),
        ["Ada", "Ben", "Cal", "Dee", "Finn", "Jon"]
    );
    // Limits are already reached.
    assert_eq!(engine.apply_tags(&mut r.show, &applicants), 0);
}

#[test]
fn test_rank_is_stable() {
    let ids: Vec<ApplicantId> = (0..4).map(ApplicantId).collect();
    let scores = [1.0, 2.0, 1.0, 0.5];
    let descending = rank(&ids, |a| scores[a.index()], SortDirection::Descending);
    assert_eq!(descending, [ids[1], ids[0], ids[2], ids[3]]);
    let ascending = rank(&ids, |a| scores[a.index()], SortDirection::Ascending);
    assert_eq!(ascending, [ids[3], ids[0], ids[2], ids[1]]);
}
