//! Descriptor → decoder selection

use analogsense_transport::{DeviceDescriptor, DeviceFilter};

use crate::devices::RuleGroup;

/// First rule group with a filter covering `desc`
///
/// Groups are tried in slice order, filters in group order. `None` means the
/// device is unsupported, not faulty.
pub fn find_rule_group<'a>(
    desc: &DeviceDescriptor,
    groups: &'a [RuleGroup],
) -> Option<&'a RuleGroup> {
    groups.iter().find(|g| g.matching_filter(desc).is_some())
}

/// Every filter of every group, in priority order
///
/// This is the set handed to the host when asking for a new device.
pub fn union_filters(groups: &[RuleGroup]) -> Vec<DeviceFilter> {
    let mut filters: Vec<DeviceFilter> = Vec::new();
    for f in groups.iter().flat_map(|g| g.filters.iter()) {
        if !filters.contains(f) {
            filters.push(*f);
        }
    }
    filters
}
