//! Booking option toggles.
//!
//! Eight independent boolean options shape the price. Three are derived by the
//! engine from the booking itself ([`AutoOptions`]); the other five are chosen by
//! the customer ([`UserOptions`]). Together they form the [`OptionSet`] that is
//! priced and submitted with an order.

use serde::{Deserialize, Serialize};

/// One step of the adjustment chain.
///
/// [`Adjustment::CHAIN`] lists the steps in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Discount for booking well ahead of the start date (auto).
    EarlyRegistration,
    /// Discount for groups (auto).
    GroupEnrollment,
    /// Surcharge for intensive bookings (auto).
    IntensiveCourse,
    /// Cultural excursions surcharge.
    Excursions,
    /// Interactive platform access surcharge.
    Interactive,
    /// Printed materials, charged per person.
    Supplementary,
    /// Personalised study plan, charged per billing week.
    Personalized,
    /// Final assessment, flat fee.
    Assessment,
}

impl Adjustment {
    /// Every adjustment in application order: percentage steps first, then
    /// fixed additions.
    pub const CHAIN: [Adjustment; 8] = [
        Adjustment::EarlyRegistration,
        Adjustment::GroupEnrollment,
        Adjustment::IntensiveCourse,
        Adjustment::Excursions,
        Adjustment::Interactive,
        Adjustment::Supplementary,
        Adjustment::Personalized,
        Adjustment::Assessment,
    ];

    /// The option field name used on the wire.
    pub fn option_name(&self) -> &'static str {
        match self {
            Adjustment::EarlyRegistration => "early_registration",
            Adjustment::GroupEnrollment => "group_enrollment",
            Adjustment::IntensiveCourse => "intensive_course",
            Adjustment::Excursions => "excursions",
            Adjustment::Interactive => "interactive",
            Adjustment::Supplementary => "supplementary",
            Adjustment::Personalized => "personalized",
            Adjustment::Assessment => "assessment",
        }
    }

    /// Whether the engine derives this option instead of the customer.
    pub fn is_auto(&self) -> bool {
        matches!(
            self,
            Adjustment::EarlyRegistration
                | Adjustment::GroupEnrollment
                | Adjustment::IntensiveCourse
        )
    }
}

/// Options the engine derives from the booking inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoOptions {
    /// Start date is far enough ahead.
    pub early_registration: bool,
    /// Enough persons for the group discount.
    pub group_enrollment: bool,
    /// Heavy enough hourly load to count as intensive.
    pub intensive_course: bool,
}

/// Options the customer picks freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOptions {
    /// Printed materials.
    #[serde(default)]
    pub supplementary: bool,
    /// Personalised study plan.
    #[serde(default)]
    pub personalized: bool,
    /// Cultural excursions.
    #[serde(default)]
    pub excursions: bool,
    /// Final assessment.
    #[serde(default)]
    pub assessment: bool,
    /// Interactive platform access.
    #[serde(default)]
    pub interactive: bool,
}

impl UserOptions {
    /// Combines the customer's choices with freshly derived auto options.
    pub fn with_auto(self, auto: AutoOptions) -> OptionSet {
        OptionSet {
            early_registration: auto.early_registration,
            group_enrollment: auto.group_enrollment,
            intensive_course: auto.intensive_course,
            supplementary: self.supplementary,
            personalized: self.personalized,
            excursions: self.excursions,
            assessment: self.assessment,
            interactive: self.interactive,
        }
    }
}

/// The full set of eight options.
///
/// Every field is always serialized. The order API treats an absent boolean
/// as `false`, so dropping the auto flags on an update would silently clear
/// them.
///
/// # Example
///
/// ```
/// use quote_engine::models::{Adjustment, OptionSet};
///
/// let options = OptionSet {
///     group_enrollment: true,
///     assessment: true,
///     ..OptionSet::default()
/// };
///
/// let enabled: Vec<Adjustment> = options.enabled().collect();
/// assert_eq!(enabled, vec![Adjustment::GroupEnrollment, Adjustment::Assessment]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSet {
    /// Early registration discount.
    #[serde(default)]
    pub early_registration: bool,
    /// Group discount.
    #[serde(default)]
    pub group_enrollment: bool,
    /// Intensive surcharge.
    #[serde(default)]
    pub intensive_course: bool,
    /// Printed materials.
    #[serde(default)]
    pub supplementary: bool,
    /// Personalised study plan.
    #[serde(default)]
    pub personalized: bool,
    /// Cultural excursions.
    #[serde(default)]
    pub excursions: bool,
    /// Final assessment.
    #[serde(default)]
    pub assessment: bool,
    /// Interactive platform access.
    #[serde(default)]
    pub interactive: bool,
}

impl OptionSet {
    /// Returns whether the option behind an adjustment is switched on.
    pub fn is_enabled(&self, adjustment: Adjustment) -> bool {
        match adjustment {
            Adjustment::EarlyRegistration => self.early_registration,
            Adjustment::GroupEnrollment => self.group_enrollment,
            Adjustment::IntensiveCourse => self.intensive_course,
            Adjustment::Excursions => self.excursions,
            Adjustment::Interactive => self.interactive,
            Adjustment::Supplementary => self.supplementary,
            Adjustment::Personalized => self.personalized,
            Adjustment::Assessment => self.assessment,
        }
    }

    /// Enabled adjustments in chain order.
    pub fn enabled(&self) -> impl Iterator<Item = Adjustment> + '_ {
        Adjustment::CHAIN
            .into_iter()
            .filter(move |adjustment| self.is_enabled(*adjustment))
    }

    /// The three engine-derived flags.
    pub fn auto(&self) -> AutoOptions {
        AutoOptions {
            early_registration: self.early_registration,
            group_enrollment: self.group_enrollment,
            intensive_course: self.intensive_course,
        }
    }

    /// The five customer-chosen flags.
    pub fn user(&self) -> UserOptions {
        UserOptions {
            supplementary: self.supplementary,
            personalized: self.personalized,
            excursions: self.excursions,
            assessment: self.assessment,
            interactive: self.interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_puts_percentages_before_fixed_additions() {
        assert_eq!(Adjustment::CHAIN[0], Adjustment::EarlyRegistration);
        assert_eq!(Adjustment::CHAIN[4], Adjustment::Interactive);
        assert_eq!(Adjustment::CHAIN[5], Adjustment::Supplementary);
        assert_eq!(Adjustment::CHAIN[7], Adjustment::Assessment);
    }

    #[test]
    fn test_only_first_three_are_auto() {
        let auto: Vec<bool> = Adjustment::CHAIN.iter().map(Adjustment::is_auto).collect();
        assert_eq!(auto, vec![true, true, true, false, false, false, false, false]);
    }

    #[test]
    fn test_with_auto_overrides_nothing_the_user_chose() {
        let user = UserOptions {
            supplementary: true,
            interactive: true,
            ..UserOptions::default()
        };
        let auto = AutoOptions {
            group_enrollment: true,
            ..AutoOptions::default()
        };

        let options = user.with_auto(auto);
        assert!(options.supplementary);
        assert!(options.interactive);
        assert!(options.group_enrollment);
        assert!(!options.early_registration);
        assert_eq!(options.user(), user);
        assert_eq!(options.auto(), auto);
    }

    #[test]
    fn test_enabled_follows_chain_order_not_field_order() {
        // supplementary is declared before excursions, but applied after it
        let options = OptionSet {
            supplementary: true,
            excursions: true,
            early_registration: true,
            ..OptionSet::default()
        };
        let enabled: Vec<Adjustment> = options.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                Adjustment::EarlyRegistration,
                Adjustment::Excursions,
                Adjustment::Supplementary
            ]
        );
    }

    #[test]
    fn test_option_set_serializes_all_eight_fields() {
        let json = serde_json::to_value(OptionSet::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 8);
        for adjustment in Adjustment::CHAIN {
            assert_eq!(object[adjustment.option_name()], false);
        }
    }

    #[test]
    fn test_option_set_missing_fields_default_to_false() {
        let options: OptionSet = serde_json::from_str(r#"{"assessment": true}"#).unwrap();
        assert!(options.assessment);
        assert_eq!(options.enabled().count(), 1);
    }
}
