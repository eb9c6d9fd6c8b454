//! Rules that apply to every member kind.

use super::Checker;
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![changed_member_type(), member_removal()]
}

fn changed_member_type() -> Checker {
    Checker::new(ChangeCode::ChangedMemberType, |before, after| {
        let after = after?;
        (before.member_type() != after.member_type()).then(|| {
            format!(
                "Member type changed from '{}' to '{}'",
                before.member_type(),
                after.member_type()
            )
        })
    })
}

fn member_removal() -> Checker {
    Checker::new(ChangeCode::MemberRemoval, |before, after| {
        after
            .is_none()
            .then(|| format!("Member '{}' removed from package", before.qualified_name()))
    })
}
