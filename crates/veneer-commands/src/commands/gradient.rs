//! /gradient - animated colour treatment for the local name
//!
//! Accepts a preset name, `off`, or `c1,c2[,...][,speedMs]`. A trailing
//! argument that starts with an integer is taken as the speed.

use crate::registry::{Command, Reply};
use veneer_core::{Error, GradientSpec, Result};
use veneer_overlay::Overlay;

pub struct GradientCommand;

impl Command for GradientCommand {
    fn name(&self) -> &str { "gradient" }

    fn usage(&self) -> &str { "/gradient <preset|c1,c2,s>" }

    fn description(&self) -> &str {
        "Preset (fire, ocean, sunset, neon, rainbow), 2-6 colors + speed in ms, or off"
    }

    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply> {
        let key = args.to_lowercase();
        if key == "off" || key == "none" {
            overlay.context().store_mut().clear_local_gradient();
            return Ok(Reply::published("Gradient removed."));
        }
        if let Some(spec) = GradientSpec::preset(&key) {
            overlay.context().store_mut().set_local_gradient(spec);
            return Ok(Reply::published(format!("Preset applied: {}", key)));
        }

        let spec = parse_custom(args)?;
        let count = spec.colors().len();
        overlay.context().store_mut().set_local_gradient(spec);
        Ok(Reply::published(format!(
            "Custom gradient applied ({} colors).",
            count
        )))
    }
}

fn parse_custom(args: &str) -> Result<GradientSpec> {
    if args.split(',').count() < 2 {
        return Err(Error::validation("Usage: /gradient color1,color2[,speed]"));
    }
    let mut colors: Vec<&str> = args.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    let mut speed = i64::from(GradientSpec::DEFAULT_PERIOD_MS);
    if let Some(n) = colors.last().and_then(|s| leading_int(s)) {
        speed = n;
        colors.pop();
    }
    let period = u32::try_from(speed)
        .ok()
        .filter(|p| (GradientSpec::MIN_PERIOD_MS..=GradientSpec::MAX_PERIOD_MS).contains(p));
    match period {
        Some(p) if (GradientSpec::MIN_COLORS..=GradientSpec::MAX_COLORS).contains(&colors.len()) => {
            GradientSpec::parse(&colors, p)
        }
        _ => Err(Error::validation("Invalid: 2-6 colors, speed 10-1000.")),
    }
}

/// Integer prefix of `s` (optional sign, then digits), like a lenient parse.
fn leading_int(s: &str) -> Option<i64> {
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_is_lenient() {
        assert_eq!(leading_int("80"), Some(80));
        assert_eq!(leading_int("80ms"), Some(80));
        assert_eq!(leading_int("-5"), Some(-5));
        assert_eq!(leading_int("#ff0000"), None);
        assert_eq!(leading_int("red"), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn custom_with_and_without_speed() {
        let spec = parse_custom("red, blue, 250").unwrap();
        assert_eq!(spec.colors().len(), 2);
        assert_eq!(spec.period_ms(), 250);

        let spec = parse_custom("#ff0000,#00ff00,#0000ff").unwrap();
        assert_eq!(spec.period_ms(), 100);
        assert_eq!(spec.colors().len(), 3);
    }

    #[test]
    fn custom_rejects_bad_input() {
        assert!(parse_custom("10").unwrap_err().is_validation());
        assert!(parse_custom("red,10").unwrap_err().is_validation());
        assert!(parse_custom("red,blue,5").unwrap_err().is_validation());
        assert!(parse_custom("red,blue,5000").unwrap_err().is_validation());
        assert!(parse_custom("a,b,c,d,e,f,g").is_err());
        assert!(parse_custom("red,blorange").unwrap_err().is_validation());
    }
}
