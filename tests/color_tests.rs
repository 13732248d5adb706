use approx::assert_relative_eq;
use palette::{FromColor, Srgb};
use tabtint::color::{
    Hsl, generate_hue_variations, hex_to_rgb, rgb_to_hsl, rgb_to_hsl_unrounded, srgb_to_hex,
};

#[test]
fn test_hex_to_rgb_white() {
    let rgb = hex_to_rgb("#ffffff");
    assert_eq!((rgb.red, rgb.green, rgb.blue), (1.0, 1.0, 1.0));
}

#[test]
fn test_hex_to_rgb_short_form_duplicates_nibbles() {
    let short = hex_to_rgb("#a4e");
    let long = hex_to_rgb("#aa44ee");
    assert_eq!(short, long);
}

#[test]
fn test_hex_to_rgb_accent_base() {
    let rgb = hex_to_rgb("#a4a7e0");
    assert_relative_eq!(rgb.red, 0.643, epsilon = 1e-3);
    assert_relative_eq!(rgb.green, 0.655, epsilon = 1e-3);
    assert_relative_eq!(rgb.blue, 0.878, epsilon = 1e-3);
}

#[test]
fn test_hex_to_rgb_malformed_is_black() {
    for input in ["#ab", "", "#abcd", "#abcdef0", "not a colour"] {
        let rgb = hex_to_rgb(input);
        assert_eq!(
            (rgb.red, rgb.green, rgb.blue),
            (0.0, 0.0, 0.0),
            "{input:?} should default to black"
        );
    }
}

#[test]
fn test_hex_to_rgb_invalid_digits_read_as_zero() {
    let rgb = hex_to_rgb("#zz8000");
    assert_eq!(rgb.red, 0.0);
    assert_relative_eq!(rgb.green, 128.0 / 255.0);
}

#[test]
fn test_rgb_to_hsl_white() {
    assert_eq!(rgb_to_hsl(Srgb::new(1.0, 1.0, 1.0)), Hsl::new(0, 0, 100));
}

#[test]
fn test_rgb_to_hsl_black() {
    assert_eq!(rgb_to_hsl(Srgb::new(0.0, 0.0, 0.0)), Hsl::new(0, 0, 0));
}

#[test]
fn test_rgb_to_hsl_primaries() {
    assert_eq!(rgb_to_hsl(Srgb::new(1.0, 0.0, 0.0)), Hsl::new(0, 100, 50));
    assert_eq!(rgb_to_hsl(Srgb::new(0.0, 1.0, 0.0)), Hsl::new(120, 100, 50));
    assert_eq!(rgb_to_hsl(Srgb::new(0.0, 0.0, 1.0)), Hsl::new(240, 100, 50));
}

#[test]
fn test_rgb_to_hsl_shared_maximum() {
    assert_eq!(rgb_to_hsl(Srgb::new(1.0, 1.0, 0.0)), Hsl::new(60, 100, 50));
    assert_eq!(rgb_to_hsl(Srgb::new(1.0, 0.0, 1.0)), Hsl::new(300, 100, 50));
    assert_eq!(rgb_to_hsl(Srgb::new(0.0, 1.0, 1.0)), Hsl::new(180, 100, 50));
}

#[test]
fn test_rgb_to_hsl_accent_base() {
    let hsl = rgb_to_hsl(hex_to_rgb("#a4a7e0"));
    assert_eq!(hsl, Hsl::new(237, 49, 76));
}

#[test]
fn test_rgb_to_hsl_hue_never_reaches_360() {
    // Hue of #ff0001 is 359.76 degrees before rounding
    let hsl = rgb_to_hsl(hex_to_rgb("#ff0001"));
    assert_eq!(hsl.h, 0);
}

#[test]
fn test_round_trip_within_one_unit() {
    for r in (0..=255u8).step_by(17) {
        for g in (0..=255u8).step_by(17) {
            for b in (0..=255u8).step_by(17) {
                let original = Srgb::new(r, g, b);
                let hsl = rgb_to_hsl_unrounded(hex_to_rgb(&srgb_to_hex(original)));
                let back: Srgb<u8> = Srgb::<f64>::from_color(hsl).into_format();

                for (want, got) in [
                    (original.red, back.red),
                    (original.green, back.green),
                    (original.blue, back.blue),
                ] {
                    assert!(
                        want.abs_diff(got) <= 1,
                        "{} came back as {}",
                        srgb_to_hex(original),
                        srgb_to_hex(back)
                    );
                }
            }
        }
    }
}

#[test]
fn test_integer_hsl_converts_back_close_to_source() {
    let back = Hsl::new(237, 49, 76).to_srgb();
    let source = Srgb::new(0xa4u8, 0xa7, 0xe0);
    assert!(back.red.abs_diff(source.red) <= 3);
    assert!(back.green.abs_diff(source.green) <= 3);
    assert!(back.blue.abs_diff(source.blue) <= 3);
}

#[test]
fn test_generate_hue_variations_count() {
    for count in [0, 1, 5, 12] {
        assert_eq!(generate_hue_variations("#a4a7e0", count, 30).len(), count);
    }
}

#[test]
fn test_generate_hue_variations_negative_step() {
    let colors = generate_hue_variations("#a4a7e0", 5, -15);
    let hues: Vec<u16> = colors.iter().map(|c| c.h).collect();
    assert_eq!(hues, vec![237, 222, 207, 192, 177]);
    assert!(colors.iter().all(|c| c.s == 49 && c.l == 76));
}

#[test]
fn test_generate_hue_variations_wraps_into_range() {
    let base = rgb_to_hsl(hex_to_rgb("#a4a7e0"));
    for step in [-400, -90, -15, 0, 45, 170, 725] {
        let colors = generate_hue_variations("#a4a7e0", 9, step);
        assert_eq!(colors[0], base);
        for (i, color) in colors.iter().enumerate() {
            assert!(color.h < 360);
            let expected = (i64::from(base.h) + i as i64 * i64::from(step)).rem_euclid(360);
            assert_eq!(i64::from(color.h), expected);
        }
    }
}

#[test]
fn test_generate_hue_variations_malformed_base_is_black() {
    let colors = generate_hue_variations("#ab", 3, 40);
    assert_eq!(colors, vec![Hsl::new(0, 0, 0), Hsl::new(40, 0, 0), Hsl::new(80, 0, 0)]);
}

#[test]
fn test_css_rendering() {
    let hsl = Hsl::new(237, 49, 76);
    assert_eq!(hsl.to_css(), "hsl(237, 49%, 76%)");
    assert_eq!(hsl.to_css_alpha(0.1), "hsl(237, 49%, 76%, 0.1)");
    assert_eq!(hsl.darken(10).to_css(), "hsl(237, 49%, 66%)");
    assert_eq!(Hsl::new(0, 0, 4).darken(10).l, 0);
}
