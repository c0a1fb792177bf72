use std::collections::BTreeSet;

use serde::Serialize;

use crate::database::models::{Role, User};

/// Operations an actor may be allowed to perform. Handlers and services check
/// these instead of comparing roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ApplyLeave,
    CancelOwnLeave,
    DecideTeamLeave,
    DecideAnyLeave,
    ViewDirectory,
    ManageUsers,
    ManageConfiguration,
    ViewReports,
    ResetData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn for_role(role: Role) -> Self {
        use Capability::*;

        let capabilities: &[Capability] = match role {
            Role::Employee => &[ApplyLeave, CancelOwnLeave],
            Role::Manager => &[ApplyLeave, CancelOwnLeave, DecideTeamLeave, ViewDirectory],
            Role::Admin => &[
                DecideTeamLeave,
                DecideAnyLeave,
                ViewDirectory,
                ManageUsers,
                ManageConfiguration,
                ViewReports,
                ResetData,
            ],
        };

        Self(capabilities.iter().copied().collect())
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Whether the holder may decide leave requests owned by `owner`, given
    /// the holder's own user id.
    pub fn can_decide_for(&self, actor_id: &str, owner: &User) -> bool {
        self.contains(Capability::DecideAnyLeave)
            || (self.contains(Capability::DecideTeamLeave) && owner.reports_to(actor_id))
    }
}

impl Role {
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::for_role(*self)
    }

    /// Whether a user with this role can be someone's manager.
    pub fn can_manage_team(&self) -> bool {
        self.capabilities().contains(Capability::DecideTeamLeave)
    }
}
