use super::*;
use crate::state::user::UserRole;

fn user(first: &str, last: &str) -> User {
    User {
        id: "1".to_owned(),
        email: "john@example.com".to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        phone: "+1234567890".to_owned(),
        address: "123 Main St, City, Country".to_owned(),
        role: UserRole::Bidder,
    }
}

#[test]
fn initials_uppercase_first_letters() {
    assert_eq!(initials(&user("john", "doe")), "JD");
}

#[test]
fn initials_skip_blank_parts() {
    assert_eq!(initials(&user("Cher", "  ")), "C");
    assert_eq!(initials(&user("", "")), "");
}

#[test]
fn normalize_update_trims_every_field() {
    let update = ProfileUpdate {
        first_name: " John ".to_owned(),
        last_name: "Doe\n".to_owned(),
        phone: " +1 ".to_owned(),
        address: "\t1 Main St".to_owned(),
    };
    assert_eq!(
        normalize_update(&update),
        ProfileUpdate {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            phone: "+1".to_owned(),
            address: "1 Main St".to_owned(),
        }
    );
}
