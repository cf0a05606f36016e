use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Address {
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) country: String,
    pub(crate) pincode: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct User {
    pub(crate) name: String,
    pub(crate) age: u32,
    pub(crate) contact: String,
    pub(crate) company: String,
    pub(crate) address: Address,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Address { city, state, country, pincode } = &self.address;
        write!(
            f,
            "{} ({}) - {}, {}, {city}, {state}, {country} {pincode}",
            self.name, self.age, self.contact, self.company
        )
    }
}

fn employee(
    name: &str,
    age: u32,
    contact: &str,
    company: &str,
    (city, state, country): (&str, &str, &str),
    pincode: u32,
) -> User {
    User {
        name: name.to_owned(),
        age,
        contact: contact.to_owned(),
        company: company.to_owned(),
        address: Address {
            city: city.to_owned(),
            state: state.to_owned(),
            country: country.to_owned(),
            pincode,
        },
    }
}

/// The records written by `shelf seed`.
pub(crate) fn employees() -> Vec<User> {
    vec![
        employee("John", 23, "2345423", "Google", ("banglore", "karnataka", "india"), 302_028),
        employee("Sarah", 28, "9876543", "Microsoft", ("seattle", "washington", "usa"), 98_052),
        employee("Raj", 31, "8765432", "Amazon", ("mumbai", "maharashtra", "india"), 400_001),
        employee("Maria", 26, "3456789", "Apple", ("cupertino", "california", "usa"), 95_014),
        employee("Yuki", 29, "7654321", "Sony", ("tokyo", "kanto", "japan"), 100_001),
    ]
}
