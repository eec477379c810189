// Unit tests for the label palette

use crate::{LabelColor, ModelError};

/// **VALUE**: Verifies the palette names that differ between Trello's wire format
/// and the public enum.
///
/// **WHY THIS MATTERS**: Trello calls LimeGreen "lime" and SkyBlue "sky". Sending the
/// enum name would be rejected with a 400.
#[test]
fn given_renamed_palette_entries_when_converted_to_wire_then_uses_trello_names() {
    assert_eq!(LabelColor::LimeGreen.as_wire(), "lime");
    assert_eq!(LabelColor::SkyBlue.as_wire(), "sky");
    assert_eq!(LabelColor::None.as_wire(), "null");
    assert_eq!(LabelColor::Red.as_wire(), "red");
}

#[test]
fn given_wire_values_when_mapped_then_every_palette_entry_survives() {
    for color in LabelColor::ALL {
        let wire = match color {
            LabelColor::None => None,
            other => Some(other.as_wire()),
        };
        assert_eq!(LabelColor::from_wire(wire), color);
    }
}

/// **VALUE**: Verifies shade variants collapse onto their base color and unknown
/// values do not fail decoding.
///
/// **BUG THIS CATCHES**: A board using Trello's newer "green_dark" shades would
/// otherwise fail to deep load.
#[test]
fn given_shade_or_unknown_wire_color_when_mapped_then_uses_base_or_none() {
    assert_eq!(LabelColor::from_wire(Some("green_dark")), LabelColor::Green);
    assert_eq!(LabelColor::from_wire(Some("sky_light")), LabelColor::SkyBlue);
    assert_eq!(LabelColor::from_wire(Some("chartreuse")), LabelColor::None);
}

#[test]
fn given_user_input_when_parsed_then_accepts_enum_and_wire_spellings() {
    assert_eq!("LimeGreen".parse::<LabelColor>().unwrap(), LabelColor::LimeGreen);
    assert_eq!("sky".parse::<LabelColor>().unwrap(), LabelColor::SkyBlue);
    assert_eq!("sky-blue".parse::<LabelColor>().unwrap(), LabelColor::SkyBlue);
    assert_eq!(" Purple ".parse::<LabelColor>().unwrap(), LabelColor::Purple);
    assert_eq!("none".parse::<LabelColor>().unwrap(), LabelColor::None);

    let err = "magenta".parse::<LabelColor>().unwrap_err();
    assert!(matches!(err, ModelError::UnknownLabelColor { .. }));
}
