use crate::state::AppState;

pub fn has_completed_onboarding(state: &AppState) -> bool {
    state.store.has_completed_onboarding()
}

pub fn complete_onboarding(state: &AppState) {
    state.store.set_onboarding_complete();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;

    #[test]
    fn onboarding_flag_sticks() {
        let state = testing::state();
        assert!(!has_completed_onboarding(&state));
        complete_onboarding(&state);
        assert!(has_completed_onboarding(&state));
    }
}
