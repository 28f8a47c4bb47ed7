use serde::{Deserialize, Serialize};
use std::fmt;

/// Services a membership can include
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Gym,
    Cardio,
    Crossfit,
    PersonalTraining,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Gym,
        Service::Cardio,
        Service::Crossfit,
        Service::PersonalTraining,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Gym => "Gym",
            Service::Cardio => "Cardio",
            Service::Crossfit => "Crossfit",
            Service::PersonalTraining => "Personal Training",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Independent service flags chosen at registration. Flags are not
/// mutually exclusive; this type does not enforce non-emptiness.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSelection {
    #[serde(default)]
    pub gym: bool,
    #[serde(default)]
    pub cardio: bool,
    #[serde(default)]
    pub crossfit: bool,
    #[serde(default)]
    pub pt: bool,
}

impl ServiceSelection {
    pub fn of(services: &[Service]) -> Self {
        let mut selection = Self::default();
        for service in services {
            selection.set(*service, true);
        }
        selection
    }

    pub fn contains(&self, service: Service) -> bool {
        match service {
            Service::Gym => self.gym,
            Service::Cardio => self.cardio,
            Service::Crossfit => self.crossfit,
            Service::PersonalTraining => self.pt,
        }
    }

    pub fn set(&mut self, service: Service, selected: bool) {
        match service {
            Service::Gym => self.gym = selected,
            Service::Cardio => self.cardio = selected,
            Service::Crossfit => self.crossfit = selected,
            Service::PersonalTraining => self.pt = selected,
        }
    }

    /// Selected services in catalog order
    pub fn selected(&self) -> impl Iterator<Item = Service> + '_ {
        Service::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    pub fn is_empty(&self) -> bool {
        self.selected().next().is_none()
    }
}
