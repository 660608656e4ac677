use crate::model::{Model, NodeId};

/// Parts of a device model the scene wires behavior to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionRole {
    Screen,
    SwitchButton,
    HomeButton,
}

impl RegionRole {
    pub const ALL: [RegionRole; 3] = [Self::Screen, Self::SwitchButton, Self::HomeButton];

    /// Node name the asset exports for this role.
    pub fn node_name(self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::SwitchButton => "switch-button",
            Self::HomeButton => "home-button",
        }
    }

    pub fn is_clickable(self) -> bool {
        matches!(self, Self::SwitchButton | Self::HomeButton)
    }
}

/// Roles resolved against one loaded model. A role the model lacks simply
/// stays unresolved and the feature behind it is off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionMap {
    screen: Option<NodeId>,
    switch_button: Option<NodeId>,
    home_button: Option<NodeId>,
}

impl RegionMap {
    pub fn resolve(model: &Model) -> Self {
        let mut map = Self::default();
        for role in RegionRole::ALL {
            let node = model.find_node(role.node_name());
            if node.is_none() {
                log::info!(
                    "{} has no '{}' node; {:?} disabled",
                    model.name,
                    role.node_name(),
                    role
                );
            }
            *map.slot_mut(role) = node;
        }
        map
    }

    pub fn get(&self, role: RegionRole) -> Option<NodeId> {
        match role {
            RegionRole::Screen => self.screen,
            RegionRole::SwitchButton => self.switch_button,
            RegionRole::HomeButton => self.home_button,
        }
    }

    fn slot_mut(&mut self, role: RegionRole) -> &mut Option<NodeId> {
        match role {
            RegionRole::Screen => &mut self.screen,
            RegionRole::SwitchButton => &mut self.switch_button,
            RegionRole::HomeButton => &mut self.home_button,
        }
    }

    /// Resolved clickable regions in declaration order.
    pub fn clickable(&self) -> Vec<(RegionRole, NodeId)> {
        RegionRole::ALL
            .into_iter()
            .filter(|role| role.is_clickable())
            .filter_map(|role| self.get(role).map(|id| (role, id)))
            .collect()
    }

    pub fn has_clickable(&self) -> bool {
        self.switch_button.is_some() || self.home_button.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Transform};

    #[test]
    fn resolves_present_roles_and_leaves_missing_ones_empty() {
        let mut model = Model::new("partial");
        let root = model.add_node(Node::new(Some("device".into()), Transform::identity()), None);
        let screen = model.add_node(Node::new(Some("screen".into()), Transform::identity()), Some(root));
        let home = model.add_node(
            Node::new(Some("home-button".into()), Transform::identity()),
            Some(root),
        );

        let map = RegionMap::resolve(&model);
        assert_eq!(map.get(RegionRole::Screen), Some(screen));
        assert_eq!(map.get(RegionRole::HomeButton), Some(home));
        assert_eq!(map.get(RegionRole::SwitchButton), None);
        assert_eq!(map.clickable(), vec![(RegionRole::HomeButton, home)]);
        assert!(map.has_clickable());
    }

    #[test]
    fn empty_model_has_nothing_clickable() {
        let map = RegionMap::resolve(&Model::new("empty"));
        assert!(!map.has_clickable());
        assert!(map.clickable().is_empty());
    }
}
