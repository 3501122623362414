/**
 * @file factory.rs
 * @author Nguyen Le Duy
 * @date 20/05/2025
 * @brief Component construction from placement requests
 */
use crate::common::GridPos;
use crate::component::wire::DEFAULT_WIRE_COLOR;
use crate::component::{Component, Led, Resistor, Wire};
use crate::error::Error;
use crate::Result;
use api_types::{ComponentTemplate, LedColor};

pub const DEFAULT_RESISTANCE_OHMS: f32 = 1000.0;

/// Build a component from the placement layer's request. Type names are the
/// toolbox identifiers, matched case-insensitively; anything unrecognized is
/// a hard error and nothing is constructed.
pub fn create(
    type_name: &str,
    position: GridPos,
    template: &ComponentTemplate,
) -> Result<Component> {
    match type_name.to_ascii_lowercase().as_str() {
        "led" => {
            let color = template.color.unwrap_or(LedColor::Red);
            Ok(Component::Led(Led::new(color, position)))
        }
        "resistor" => {
            let resistance = template.resistance.unwrap_or(DEFAULT_RESISTANCE_OHMS);
            Ok(Component::Resistor(Resistor::new(resistance, position)))
        }
        "wire" => {
            let color = template
                .wire_color
                .clone()
                .unwrap_or_else(|| DEFAULT_WIRE_COLOR.to_string());
            Ok(Component::Wire(Wire::new(position, color)))
        }
        _ => Err(Error::UnknownComponentType(type_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;

    #[test]
    fn test_create_led_with_template_color() {
        let template = ComponentTemplate {
            color: Some(LedColor::Blue),
            ..Default::default()
        };
        let component = create("LED", GridPos::new(1, 2), &template).unwrap();

        assert_eq!(component.kind(), ComponentKind::Led);
        assert_eq!(component.as_led().unwrap().color(), LedColor::Blue);
        assert_eq!(component.position(), GridPos::new(1, 2));
    }

    #[test]
    fn test_create_resistor_defaults_to_one_kiloohm() {
        let component = create("resistor", GridPos::new(0, 0), &Default::default()).unwrap();
        assert_eq!(component.as_resistor().unwrap().resistance, 1000.0);
    }

    #[test]
    fn test_create_wire_starts_incomplete() {
        let component = create("wire", GridPos::new(0, 0), &Default::default()).unwrap();
        assert!(!component.as_wire().unwrap().is_complete());
    }

    #[test]
    fn test_unknown_type_is_a_hard_error() {
        let result = create("capacitor", GridPos::new(0, 0), &Default::default());
        assert!(matches!(result, Err(Error::UnknownComponentType(_))));
    }
}
