use std::collections::{HashMap, HashSet};

use log::debug;

/// Re-exported key enum from `winit` so callers don't need to depend on it.
pub use winit::keyboard::KeyCode;

/// Logical actions the game reads.  Keys and touch buttons map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Sprint,
    Jump,
    Interact,
    ToggleTheme,
    Close,
}

/// On-screen buttons of the mobile control overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Left,
    Right,
    Sprint,
    Jump,
    Interact,
}

impl TouchButton {
    fn action(self) -> Action {
        match self {
            TouchButton::Left => Action::Left,
            TouchButton::Right => Action::Right,
            TouchButton::Sprint => Action::Sprint,
            TouchButton::Jump => Action::Jump,
            TouchButton::Interact => Action::Interact,
        }
    }
}

/// Maps keys to logical actions.
///
/// A key may drive several actions and an action may have several keys.
///
/// # Example
/// ```rust,ignore
/// let mut bindings = KeyBindings::default();
/// bindings.bind(KeyCode::KeyK, Action::Jump);
/// bindings.unbind(KeyCode::ArrowUp);
/// ```
#[derive(Debug, Clone)]
pub struct KeyBindings {
    mappings: HashMap<KeyCode, Vec<Action>>,
}

impl KeyBindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self { mappings: HashMap::new() }
    }

    /// Binds `key` to `action`.  Binding the same pair twice is a no-op.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        let actions = self.mappings.entry(key).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    /// Removes every action bound to `key`.
    pub fn unbind(&mut self, key: KeyCode) {
        self.mappings.remove(&key);
    }

    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    /// Returns true if `key` is bound to `action`.
    pub fn is_bound(&self, key: KeyCode, action: Action) -> bool {
        self.mappings
            .get(&key)
            .map(|actions| actions.contains(&action))
            .unwrap_or(false)
    }

    fn keys_for(&self, action: Action) -> impl Iterator<Item = &KeyCode> {
        self.mappings
            .iter()
            .filter(move |(_, actions)| actions.contains(&action))
            .map(|(key, _)| key)
    }
}

impl Default for KeyBindings {
    /// Arrows or A/D to walk, Shift to sprint, Space/Up/W to jump, E/Enter to
    /// interact, T to toggle the theme, Escape to close.
    fn default() -> Self {
        let mut b = Self::new();
        b.bind(KeyCode::ArrowLeft, Action::Left);
        b.bind(KeyCode::KeyA, Action::Left);
        b.bind(KeyCode::ArrowRight, Action::Right);
        b.bind(KeyCode::KeyD, Action::Right);
        b.bind(KeyCode::ShiftLeft, Action::Sprint);
        b.bind(KeyCode::ShiftRight, Action::Sprint);
        b.bind(KeyCode::Space, Action::Jump);
        b.bind(KeyCode::ArrowUp, Action::Jump);
        b.bind(KeyCode::KeyW, Action::Jump);
        b.bind(KeyCode::KeyE, Action::Interact);
        b.bind(KeyCode::Enter, Action::Interact);
        b.bind(KeyCode::KeyT, Action::ToggleTheme);
        b.bind(KeyCode::Escape, Action::Close);
        b
    }
}

/// Keyboard and touch state for the current tick.
///
/// The runner feeds platform events into this structure; game code queries
/// it during update and render.  Each key is either idle or held, and the
/// tick in which it went from idle to held additionally reports it as
/// *just pressed*.  [`end_frame`](Self::end_frame) must be called exactly
/// once per tick, after every query for that tick has been made.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings:           KeyBindings,
    keys_held:          HashSet<KeyCode>,
    keys_just_pressed:  HashSet<KeyCode>,
    touch_held:         HashSet<TouchButton>,
    touch_just_pressed: HashSet<TouchButton>,
}

impl InputState {
    /// Creates a fresh, empty input state with the default bindings.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self { bindings, ..Default::default() }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    // ── Event feed ─────────────────────────────────────────────────────────

    /// Called by the event loop when a key goes down.
    ///
    /// Auto-repeat key-downs for a key that is already held are ignored so
    /// they cannot re-arm the just-pressed edge.
    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Called by the event loop when a key goes up.
    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Convenience wrapper over [`key_down`](Self::key_down) /
    /// [`key_up`](Self::key_up) for event sources that carry a bool.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.key_down(key);
        } else {
            self.key_up(key);
        }
    }

    pub fn touch_down(&mut self, button: TouchButton) {
        if self.touch_held.insert(button) {
            self.touch_just_pressed.insert(button);
        }
    }

    pub fn touch_up(&mut self, button: TouchButton) {
        self.touch_held.remove(&button);
    }

    /// Clears the just-pressed edges.  Call once per tick, after all queries.
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.touch_just_pressed.clear();
    }

    // ── Recovery ───────────────────────────────────────────────────────────

    /// Drops every held and just-pressed entry, keyboard and touch alike.
    ///
    /// A key-up is never delivered for a key released while the window is
    /// unfocused, so without this the key would stay held forever.
    pub fn force_clear(&mut self) {
        if !self.keys_held.is_empty() || !self.touch_held.is_empty() {
            debug!(
                "input force-cleared ({} keys, {} touch buttons held)",
                self.keys_held.len(),
                self.touch_held.len()
            );
        }
        self.keys_held.clear();
        self.keys_just_pressed.clear();
        self.touch_held.clear();
        self.touch_just_pressed.clear();
    }

    /// The window lost keyboard focus.
    pub fn focus_lost(&mut self) {
        self.force_clear();
    }

    /// The window became hidden (minimised, occluded, tab switched away).
    pub fn visibility_hidden(&mut self) {
        self.force_clear();
    }

    /// A context menu opened and swallowed the pointer and keyboard.
    pub fn context_menu(&mut self) {
        self.force_clear();
    }

    // ── Raw queries ────────────────────────────────────────────────────────

    /// Returns true if the given key is currently held down.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Returns true only during the tick in which `key` went down.
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn is_touch_held(&self, button: TouchButton) -> bool {
        self.touch_held.contains(&button)
    }

    /// `true` if nothing at all is held or pending.
    pub fn is_idle(&self) -> bool {
        self.keys_held.is_empty()
            && self.keys_just_pressed.is_empty()
            && self.touch_held.is_empty()
            && self.touch_just_pressed.is_empty()
    }

    // ── Action queries ─────────────────────────────────────────────────────

    /// Level signal: any key or touch button bound to `action` is held.
    pub fn held(&self, action: Action) -> bool {
        self.bindings.keys_for(action).any(|k| self.keys_held.contains(k))
            || self.touch_held.iter().any(|b| b.action() == action)
    }

    /// Edge signal: a key or touch button bound to `action` went down this tick.
    pub fn pressed(&self, action: Action) -> bool {
        self.bindings.keys_for(action).any(|k| self.keys_just_pressed.contains(k))
            || self.touch_just_pressed.iter().any(|b| b.action() == action)
    }

    pub fn move_left(&self) -> bool {
        self.held(Action::Left)
    }

    pub fn move_right(&self) -> bool {
        self.held(Action::Right)
    }

    pub fn sprint(&self) -> bool {
        self.held(Action::Sprint)
    }

    /// Horizontal intent: `-1.0`, `0.0` or `1.0`.  Left and right together
    /// cancel out.
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.move_left() {
            axis -= 1.0;
        }
        if self.move_right() {
            axis += 1.0;
        }
        axis
    }

    pub fn jump_pressed(&self) -> bool {
        self.pressed(Action::Jump)
    }

    pub fn interact_pressed(&self) -> bool {
        self.pressed(Action::Interact)
    }

    pub fn theme_toggle_pressed(&self) -> bool {
        self.pressed(Action::ToggleTheme)
    }

    pub fn close_pressed(&self) -> bool {
        self.pressed(Action::Close)
    }
}
