use animated_button::Error;
use animated_button::animation::Ease;
use animated_button::io::config::Config;
use animated_button::widget::{MaterialKind, WidgetSettings};
use std::fs;

#[test]
fn partial_file_falls_back_per_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("button.toml");
    fs::write(
        &path,
        r##"
        [widget]
        text = "go"

        [render]
        material = "physical"
        clear_color = "#000000"

        [animation]
        ease = "sine.inOut"
        "##,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let props = config.button_props().unwrap();
    assert_eq!((props.width(), props.height(), props.text()), (400, 300, "go"));

    let settings = config.widget_settings().unwrap();
    assert_eq!(settings.material, MaterialKind::Physical);
    assert_eq!(settings.ease, Ease::SineInOut);
    assert_eq!(settings.clear_color.x, 0.0);
    assert_eq!(settings.duration, WidgetSettings::default().duration);
    assert_eq!(settings.pixel_ratio, 1.6);
    assert_eq!(settings.parallax.follow, 0.02);
}

#[test]
fn read_and_value_errors_are_reported() {
    assert!(matches!(Config::load("no/such/config.toml"), Err(Error::ConfigRead { .. })));
    assert!(matches!(Config::from_toml("[widget]\nwidth = \"wide\""), Err(Error::ConfigParse(_))));

    let zero_width = Config::from_toml("[widget]\nwidth = 0").unwrap();
    assert!(matches!(zero_width.button_props(), Err(Error::InvalidSize { width: 0, .. })));

    let bad_far = Config::from_toml("[camera]\nnear = 10.0\nfar = 5.0").unwrap();
    assert!(matches!(bad_far.widget_settings(), Err(Error::ConfigValue { key: "camera.far", .. })));
}
