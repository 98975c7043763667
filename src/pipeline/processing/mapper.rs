use serde::Deserialize;

use crate::constants::{
    DEFAULT_GROUP_NAME, DISPLAY_PREFIX, GROUP_TYPE, PHONE_TYPE_MOBILE, PHONE_TYPE_WORK,
};
use crate::types::{ContactEntry, RawContact, RawCustomer};

/// Returns the value only when it is set and non-empty
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn present_or_empty(value: Option<&str>) -> String {
    present(value).unwrap_or_default().to_string()
}

fn strip_dashes(value: &str) -> String {
    value.replace('-', "")
}

/// Label for a customer: business name, else "first last" trimmed
pub fn display_name(customer: &RawCustomer) -> String {
    if let Some(business) = present(customer.business_name.as_deref()) {
        return business.to_string();
    }
    format!(
        "{} {}",
        customer.firstname.as_deref().unwrap_or_default(),
        customer.lastname.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string()
}

/// How a contact's second phone number is filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondPhone {
    /// The contact's own mobile number, dashes removed
    #[default]
    Mobile,
    /// Repeat the primary number whenever a mobile is set. Matches exports
    /// produced by the earlier tool.
    Legacy,
}

/// Maps RepairShopr customers and contacts to contact book entries
#[derive(Debug, Clone)]
pub struct EntryMapper {
    group_name: String,
    second_phone: SecondPhone,
}

impl Default for EntryMapper {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_NAME, SecondPhone::default())
    }
}

impl EntryMapper {
    pub fn new(group_name: impl Into<String>, second_phone: SecondPhone) -> Self {
        Self {
            group_name: group_name.into(),
            second_phone,
        }
    }

    fn blank_entry(&self, displayname: String) -> ContactEntry {
        ContactEntry {
            groupname: self.group_name.clone(),
            grouptype: GROUP_TYPE.to_string(),
            displayname,
            phone_1_type: PHONE_TYPE_WORK.to_string(),
            ..Default::default()
        }
    }

    /// Entry for the customer itself. The phone is copied verbatim; callers
    /// are expected to have filtered out customers without one.
    pub fn map_customer(&self, customer: &RawCustomer, display_name: &str) -> ContactEntry {
        let mut entry = self.blank_entry(format!("{}{}", DISPLAY_PREFIX, display_name));
        entry.fname = customer.firstname.clone().unwrap_or_default();
        entry.lname = customer.lastname.clone().unwrap_or_default();
        entry.company = customer.business_name.clone().unwrap_or_default();
        entry.phone_1_number = customer.phone.clone().unwrap_or_default();

        if let Some(mobile) = present(customer.mobile.as_deref()) {
            entry.phone_2_number = mobile.to_string();
            entry.phone_2_type = PHONE_TYPE_MOBILE.to_string();
        }
        entry.email_1 = present_or_empty(customer.email.as_deref());
        entry
    }

    /// Entry for a person under a customer, labelled with the customer's display name
    pub fn map_contact(&self, contact: &RawContact, display_name: &str) -> ContactEntry {
        let mut entry = self.blank_entry(format!(
            "{}{} ({})",
            DISPLAY_PREFIX,
            contact.name.as_deref().unwrap_or_default(),
            display_name
        ));
        entry.company = display_name.to_string();
        entry.phone_1_number = contact.phone.as_deref().map(strip_dashes).unwrap_or_default();

        let mobile = present(contact.mobile.as_deref());
        match self.second_phone {
            SecondPhone::Mobile => {
                if let Some(mobile) = mobile {
                    entry.phone_2_number = strip_dashes(mobile);
                }
            }
            SecondPhone::Legacy => {
                if contact.mobile.is_some() {
                    entry.phone_2_number = entry.phone_1_number.clone();
                }
            }
        }
        if mobile.is_some() {
            entry.phone_2_type = PHONE_TYPE_MOBILE.to_string();
        }
        entry.email_1 = present_or_empty(contact.email.as_deref());
        entry
    }
}
