//! Progress derivation.
//!
//! Pure function of a project snapshot: four independent step checks folded
//! into a percentage. Recomputed after every mutation that can affect a step,
//! never stored authoritatively anywhere else.

use crate::domain::project::{Project, ProgressState, ProgressStep, ProgressStepKey};

pub fn compute_progress(project: &Project) -> ProgressState {
    let selection_done = project
        .selection
        .as_ref()
        .is_some_and(|s| s.house_project_id.is_some() || s.plot_id.is_some());

    // Enum fields are guaranteed present by the typed model; only the numeric
    // fields can still be "empty".
    let parameters_done = project
        .calculation_input
        .as_ref()
        .is_some_and(|i| i.area != 0.0 && i.floors != 0);

    let summary_done = project
        .calculation_result
        .as_ref()
        .is_some_and(|r| r.total_price > 0.0);

    let contacts_done = project.contact.as_ref().is_some_and(|c| {
        c.email.as_deref().is_some_and(|e| !e.is_empty())
            || c.phone.as_deref().is_some_and(|p| !p.is_empty())
    });

    let steps = vec![
        ProgressStep {
            key: ProgressStepKey::Selection,
            label: "Выбор проекта/участка".into(),
            completed: selection_done,
        },
        ProgressStep {
            key: ProgressStepKey::Parameters,
            label: "Параметры и опции".into(),
            completed: parameters_done,
        },
        ProgressStep {
            key: ProgressStepKey::Summary,
            label: "Итоговый расчёт".into(),
            completed: summary_done,
        },
        ProgressStep {
            key: ProgressStepKey::Contacts,
            label: "Контакты".into(),
            completed: contacts_done,
        },
    ];

    let done_count = steps.iter().filter(|s| s.completed).count();
    let percent = ((done_count as f64 / steps.len() as f64) * 100.0).round() as u8;

    ProgressState { steps, percent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ContactInfo, NewProject, UserSelection};
    use crate::pricing::compute_price;

    fn empty_project() -> Project {
        Project::from_new(NewProject::default())
    }

    fn calculation_input() -> crate::domain::CalculationInput {
        serde_json::from_value(serde_json::json!({
            "area": 100.0,
            "floors": 1,
            "wallMaterial": "wood",
            "foundationType": "slab",
            "finishLevel": "basic"
        }))
        .unwrap()
    }

    #[test]
    fn empty_project_has_zero_percent() {
        let progress = compute_progress(&empty_project());
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.steps.len(), 4);
        assert!(progress.steps.iter().all(|s| !s.completed));
    }

    #[test]
    fn calculation_input_completes_only_parameters() {
        let mut project = empty_project();
        project.calculation_input = Some(calculation_input());

        let progress = compute_progress(&project);
        assert_eq!(progress.percent, 25);
        let completed: Vec<bool> = progress.steps.iter().map(|s| s.completed).collect();
        assert_eq!(completed, vec![false, true, false, false]);
    }

    #[test]
    fn steps_keep_fixed_order() {
        let progress = compute_progress(&empty_project());
        let keys: Vec<ProgressStepKey> = progress.steps.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                ProgressStepKey::Selection,
                ProgressStepKey::Parameters,
                ProgressStepKey::Summary,
                ProgressStepKey::Contacts,
            ]
        );
    }

    #[test]
    fn all_steps_complete_at_hundred_percent() {
        let input = calculation_input();
        let result = compute_price(&input);

        let mut project = empty_project();
        project.selection = Some(UserSelection {
            plot_id: Some("plot-7".into()),
            ..Default::default()
        });
        project.calculation_input = Some(input);
        project.calculation_result = Some(result);
        project.contact = Some(ContactInfo {
            phone: Some("+7 900 000-00-00".into()),
            ..Default::default()
        });

        let progress = compute_progress(&project);
        assert_eq!(progress.percent, 100);
        assert!(progress.steps.iter().all(|s| s.completed));
    }

    #[test]
    fn blank_contact_strings_do_not_count() {
        let mut project = empty_project();
        project.contact = Some(ContactInfo {
            email: Some(String::new()),
            phone: Some(String::new()),
            name: Some("Иван".into()),
        });
        let progress = compute_progress(&project);
        assert_eq!(progress.percent, 0);
    }
}
