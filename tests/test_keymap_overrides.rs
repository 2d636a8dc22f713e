use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use secretly::config::Config;
use secretly::keymap::{Action, KeyBinding, KeymapPreset};
use secretly::model::Project;
use secretly::screens::{Message, ProjectScreen, ProjectView, Screen, ScreenContext};
use secretly::styles::ThemeType;
use tempfile::TempDir;

#[test]
fn test_keymap_override_survives_config_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.theme = ThemeType::Light;
    config.table_height = 12;
    config.keymap.preset = KeymapPreset::Vim;
    config
        .keymap
        .overrides
        .push(KeyBinding::new("x", Action::Delete));
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.theme, ThemeType::Light);
    assert_eq!(loaded.table_height, 12);
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('x'), KeyModifiers::NONE),
        Some(Action::Delete)
    );
    // Overriding Delete hides the preset 'd'
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('d'), KeyModifiers::NONE),
        None
    );
}

#[test]
fn test_first_run_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load_or_create(&config_path).unwrap();
    assert!(config_path.exists());
    assert_eq!(config.keymap.preset, KeymapPreset::Standard);
    assert_eq!(config.tick_rate_ms, 100);
    assert_eq!(config.table_height, 7);
}

#[test]
fn test_vim_preset_moves_table_cursor() {
    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    let ctx = ScreenContext::new(&config);
    let mut screen = ProjectScreen::new(Project::demo());

    for c in ['j', 'j', 'k'] {
        screen
            .handle_message(
                Message::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
                &ctx,
            )
            .unwrap();
    }
    assert_eq!(screen.cursor(), Some(1));
}

#[test]
fn test_overridden_create_key_opens_form() {
    let mut config = Config::default();
    config
        .keymap
        .overrides
        .push(KeyBinding::new("ctrl+n", Action::Create));
    let ctx = ScreenContext::new(&config);
    let mut screen = ProjectScreen::new(Project::demo());

    screen
        .handle_message(
            Message::Key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            &ctx,
        )
        .unwrap();
    assert!(matches!(screen.view(), ProjectView::AddSecret(_)));
}
