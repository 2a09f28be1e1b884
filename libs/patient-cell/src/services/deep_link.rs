use shared_models::context::UserContext;

use crate::models::{ContactLink, Coordinates, DeepLinkError, InfusionCenter, RideLink, RideProvider};

const DEFAULT_COUNTRY_CODE: char = '1';

/// Palo Alto, CA.
pub const DEFAULT_PICKUP: Coordinates = Coordinates { latitude: 37.4419, longitude: -122.1430 };

/// The first entry is the default destination.
pub static INFUSION_CENTERS: [InfusionCenter; 2] = [
    InfusionCenter {
        id: "stanford",
        name: "Stanford Health Care",
        address: "300 Pasteur Dr, Stanford, CA 94305",
        location: Coordinates { latitude: 37.4337, longitude: -122.1751 },
    },
    InfusionCenter {
        id: "pamf",
        name: "Palo Alto Medical Foundation",
        address: "795 El Camino Real, Palo Alto, CA 94301",
        location: Coordinates { latitude: 37.4406, longitude: -122.1602 },
    },
];

pub fn infusion_center(id: Option<&str>) -> Result<&'static InfusionCenter, DeepLinkError> {
    match id {
        None => Ok(&INFUSION_CENTERS[0]),
        Some(id) => INFUSION_CENTERS
            .iter()
            .find(|center| center.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| DeepLinkError::UnknownCenter { id: id.to_string() }),
    }
}

/// Reduce a free-form phone number to the digits wa.me expects.
pub fn normalize_phone(input: &str) -> Result<String, DeepLinkError> {
    let mut digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("00") {
        digits = rest.to_string();
    }
    if digits.len() == 10 {
        digits.insert(0, DEFAULT_COUNTRY_CODE);
    }

    if !(8..=15).contains(&digits.len()) {
        return Err(DeepLinkError::InvalidPhone { input: input.to_string() });
    }
    Ok(digits)
}

pub fn messaging_link(phone: &str, message: &str) -> Result<ContactLink, DeepLinkError> {
    let recipient = normalize_phone(phone)?;
    let url = format!("https://wa.me/{}?text={}", recipient, urlencoding::encode(message));

    Ok(ContactLink {
        url,
        recipient,
        message: message.to_string(),
    })
}

/// Patient writing to their support representative.
pub fn rep_contact_link(
    patient: &UserContext,
    agent: &UserContext,
    patient_phone: &str,
) -> Result<ContactLink, DeepLinkError> {
    normalize_phone(patient_phone)?;

    let patient_code = patient.patient().map(|p| p.patient_code.as_str()).unwrap_or("unknown");
    let agent_phone = agent.agent().map(|a| a.phone.as_str()).unwrap_or_default();

    let message = format!(
        "Hi {}! This is {} (Patient ID: {}). I have some questions about my {} therapy. My number is {}. Thank you for your support! 💙",
        agent.given_name(),
        patient.name,
        patient_code,
        patient.therapy(),
        patient_phone.trim(),
    );

    messaging_link(agent_phone, &message)
}

/// Agent checking in on a patient.
pub fn patient_check_in_link(
    agent: &UserContext,
    patient_name: &str,
    therapy: &str,
    patient_phone: &str,
) -> Result<ContactLink, DeepLinkError> {
    let message = format!(
        "Hi {}! This is {} from Biogen Patient Services. I'm calling to check on your {} treatment. How are you feeling today? We're here to support you every step of the way! 💙",
        patient_name,
        agent.given_name(),
        therapy,
    );

    messaging_link(patient_phone, &message)
}

fn validate(point: Coordinates) -> Result<Coordinates, DeepLinkError> {
    let in_range = (-90.0..=90.0).contains(&point.latitude) && (-180.0..=180.0).contains(&point.longitude);
    if !in_range {
        return Err(DeepLinkError::InvalidCoordinates {
            latitude: point.latitude,
            longitude: point.longitude,
        });
    }
    Ok(point)
}

pub fn rideshare_link(
    provider: RideProvider,
    pickup: Coordinates,
    destination: &InfusionCenter,
) -> Result<RideLink, DeepLinkError> {
    let pickup = validate(pickup)?;
    let dropoff = validate(destination.location)?;

    let url = match provider {
        RideProvider::Uber => format!(
            "https://m.uber.com/ul/?action=setPickup&pickup[latitude]={}&pickup[longitude]={}&dropoff[latitude]={}&dropoff[longitude]={}&dropoff[nickname]={}",
            pickup.latitude,
            pickup.longitude,
            dropoff.latitude,
            dropoff.longitude,
            urlencoding::encode(destination.name),
        ),
        // Lyft's ride link takes no destination label.
        RideProvider::Lyft => format!(
            "https://lyft.com/ride?id=lyft&pickup[latitude]={}&pickup[longitude]={}&destination[latitude]={}&destination[longitude]={}",
            pickup.latitude, pickup.longitude, dropoff.latitude, dropoff.longitude,
        ),
    };

    Ok(RideLink {
        provider,
        url,
        destination: *destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 555 123-4567").unwrap(), "15551234567");
        assert_eq!(normalize_phone("(555) 123-4567").unwrap(), "15551234567");
        assert_eq!(normalize_phone("0044 20 7946 0958").unwrap(), "442079460958");
        assert_eq!(normalize_phone("+353 1 234 5678").unwrap(), "35312345678");
    }

    #[test]
    fn test_normalize_phone_rejects_bad_lengths() {
        assert!(normalize_phone("12345").is_err());
        assert!(normalize_phone("call me maybe").is_err());
        assert!(normalize_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_messaging_link_escapes_body() {
        let link = messaging_link("+15559876543", "Hi Cindy! 💙").unwrap();

        assert_eq!(link.url, "https://wa.me/15559876543?text=Hi%20Cindy%21%20%F0%9F%92%99");
        assert_eq!(link.recipient, "15559876543");
    }

    #[test]
    fn test_unknown_center() {
        assert_eq!(infusion_center(None).unwrap().name, "Stanford Health Care");
        assert_eq!(infusion_center(Some("PAMF")).unwrap().name, "Palo Alto Medical Foundation");
        assert!(infusion_center(Some("mayo")).is_err());
    }
}
