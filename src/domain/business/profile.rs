//! Public business profile.
//!
//! A sparse record: every field is optional and blank values are dropped when
//! the profile is read, so prompt context never carries empty keys.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Public-facing profile of a client's business.
///
/// Assembled from the client's `business_name` and the public columns of its
/// `business_info` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_services: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_products: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_slogan: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_mission: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_values: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_social_media: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_about: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_faq: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_testimonials: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_awards: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_certifications: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_policies: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub business_contact_info: Option<String>,
}

impl BusinessProfile {
    /// Builds a profile from a `business_info` row rendered as JSON.
    ///
    /// Columns that are not part of the public profile are ignored. The
    /// row's own `business_name` wins over the client's when it is set.
    pub fn from_row(client_business_name: Option<String>, info: &Value) -> Result<Self, serde_json::Error> {
        let mut profile: BusinessProfile = serde_json::from_value(info.clone())?;
        if profile.business_name.is_none() {
            profile.business_name = client_business_name;
        }
        Ok(profile.strip_empty())
    }

    /// Drops fields whose value is the empty string. Whitespace is kept.
    pub fn strip_empty(mut self) -> Self {
        for field in self.fields_mut() {
            if field.as_deref().map_or(false, str::is_empty) {
                *field = None;
            }
        }
        self
    }

    /// Returns true when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.to_prompt_context()
            .as_object()
            .map_or(true, |o| o.is_empty())
    }

    /// Renders the profile with the short English keys used in prompts.
    ///
    /// Absent fields are omitted from the object.
    pub fn to_prompt_context(&self) -> Value {
        let pairs: [(&str, &Option<String>); 22] = [
            ("name", &self.business_name),
            ("description", &self.business_description),
            ("type", &self.business_type),
            ("address", &self.business_address),
            ("phone", &self.business_phone),
            ("email", &self.business_email),
            ("website", &self.business_website),
            ("hours", &self.business_hours),
            ("services", &self.business_services),
            ("products", &self.business_products),
            ("slogan", &self.business_slogan),
            ("mission", &self.business_mission),
            ("values", &self.business_values),
            ("social_media", &self.business_social_media),
            ("about", &self.business_about),
            ("faq", &self.business_faq),
            ("testimonials", &self.business_testimonials),
            ("team", &self.business_team),
            ("awards", &self.business_awards),
            ("certifications", &self.business_certifications),
            ("policies", &self.business_policies),
            ("contact_info", &self.business_contact_info),
        ];

        let map = pairs
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| (key.to_string(), Value::String(v.clone())))
            })
            .collect::<serde_json::Map<_, _>>();
        Value::Object(map)
    }

    fn fields_mut(&mut self) -> [&mut Option<String>; 22] {
        [
            &mut self.business_name,
            &mut self.business_description,
            &mut self.business_type,
            &mut self.business_address,
            &mut self.business_phone,
            &mut self.business_email,
            &mut self.business_website,
            &mut self.business_hours,
            &mut self.business_services,
            &mut self.business_products,
            &mut self.business_slogan,
            &mut self.business_mission,
            &mut self.business_values,
            &mut self.business_social_media,
            &mut self.business_about,
            &mut self.business_faq,
            &mut self.business_testimonials,
            &mut self.business_team,
            &mut self.business_awards,
            &mut self.business_certifications,
            &mut self.business_policies,
            &mut self.business_contact_info,
        ]
    }
}

/// Accepts text, null, or any other JSON value (rendered as compact JSON).
///
/// Some `business_info` columns hold JSON (social links, FAQ lists) rather
/// than plain text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
