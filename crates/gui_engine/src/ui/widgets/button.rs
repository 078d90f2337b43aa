//! Button widget - interactive clickable buttons
//!
//! A button is the only widget that wants input by itself. Its visual state
//! follows the pointer and keyboard:
//!
//! ```text
//! Normal --over--> Highlighted --down--> Pressed --up--> Selected
//!    ^                  |                   |
//!    +-------out--------+    down elsewhere +--> Normal
//! ```
//!
//! `Disabled` is entered and left only through `set_interactable`. State
//! colors blend linearly over `fade_duration` seconds, advanced by
//! [`UISystem::update`](crate::ui::UISystem::update).

use crate::core::config::ButtonStyle;
use crate::events::Signal;
use crate::foundation::math::{utils, Vec4};
use crate::ui::backend::TextureHandle;
use crate::ui::input::{KeyCode, MouseButton};
use crate::ui::ElementId;

/// Button visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Resting
    #[default]
    Normal,
    /// Pointer is over the button
    Highlighted,
    /// Held down
    Pressed,
    /// Click completed
    Selected,
    /// Not interactable
    Disabled,
}

/// How a button shows its state on its target image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Tint the target image
    #[default]
    ColorSwap,
    /// Swap the target image's texture
    SpriteSwap,
}

/// One color per state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColors {
    /// Normal
    pub normal: Vec4,
    /// Highlighted
    pub highlighted: Vec4,
    /// Pressed
    pub pressed: Vec4,
    /// Selected
    pub selected: Vec4,
    /// Disabled
    pub disabled: Vec4,
}

impl StateColors {
    /// Color for `state`
    pub fn get(&self, state: ButtonState) -> Vec4 {
        match state {
            ButtonState::Normal => self.normal,
            ButtonState::Highlighted => self.highlighted,
            ButtonState::Pressed => self.pressed,
            ButtonState::Selected => self.selected,
            ButtonState::Disabled => self.disabled,
        }
    }
}

impl From<&ButtonStyle> for StateColors {
    fn from(style: &ButtonStyle) -> Self {
        Self {
            normal: style.normal_color,
            highlighted: style.highlighted_color,
            pressed: style.pressed_color,
            selected: style.selected_color,
            disabled: style.disabled_color,
        }
    }
}

/// One optional texture per state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateSprites {
    /// Normal
    pub normal: Option<TextureHandle>,
    /// Highlighted
    pub highlighted: Option<TextureHandle>,
    /// Pressed
    pub pressed: Option<TextureHandle>,
    /// Selected
    pub selected: Option<TextureHandle>,
    /// Disabled
    pub disabled: Option<TextureHandle>,
}

impl StateSprites {
    /// Texture for `state`
    pub fn get(&self, state: ButtonState) -> Option<TextureHandle> {
        match state {
            ButtonState::Normal => self.normal,
            ButtonState::Highlighted => self.highlighted,
            ButtonState::Pressed => self.pressed,
            ButtonState::Selected => self.selected,
            ButtonState::Disabled => self.disabled,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    from: Vec4,
    elapsed: f32,
}

/// What a hook changed, applied by the system after the call
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ButtonResponse {
    pub changed: Option<(ButtonState, ButtonState)>,
    pub clicked: bool,
    pub focus: Option<bool>,
    pub repaint: bool,
}

impl ButtonResponse {
    fn transition(changed: Option<(ButtonState, ButtonState)>) -> Self {
        Self { changed, repaint: changed.is_some(), ..Self::default() }
    }
}

/// UI button component
#[derive(Debug)]
pub struct UIButton {
    interactable: bool,
    /// Visual response on the target image
    pub response: ResponseType,
    state: ButtonState,
    pending: Option<ButtonState>,
    /// State colors for [`ResponseType::ColorSwap`]
    pub colors: StateColors,
    /// State textures for [`ResponseType::SpriteSwap`]
    pub sprites: StateSprites,
    /// Seconds spent blending between state colors (0 = instant)
    pub fade_duration: f32,
    fade: Option<Fade>,
    color: Vec4,
    target: Option<ElementId>,
    /// Fired with the button's id on every completed click
    pub clicked: Signal<ElementId>,
}

impl Default for UIButton {
    fn default() -> Self {
        Self::from_style(&ButtonStyle::default())
    }
}

impl UIButton {
    /// Interactable button using the given style
    pub fn from_style(style: &ButtonStyle) -> Self {
        let colors = StateColors::from(style);
        Self {
            interactable: true,
            response: ResponseType::ColorSwap,
            state: ButtonState::Normal,
            pending: None,
            color: colors.normal,
            colors,
            sprites: StateSprites::default(),
            fade_duration: style.fade_duration,
            fade: None,
            target: None,
            clicked: Signal::new(),
        }
    }

    /// Use sprite swapping (builder)
    pub fn with_sprites(mut self, sprites: StateSprites) -> Self {
        self.response = ResponseType::SpriteSwap;
        self.sprites = sprites;
        self
    }

    /// Current state
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the button reacts to input
    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Color currently shown (mid-fade while blending)
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// True while a color blend is running
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Texture for the current state
    pub fn sprite(&self) -> Option<TextureHandle> {
        self.sprites.get(self.state)
    }

    /// Image element showing this button's state
    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: Option<ElementId>) {
        self.target = target;
    }

    fn go_to(&mut self, next: ButtonState) -> Option<(ButtonState, ButtonState)> {
        if next == self.state {
            return None;
        }
        let previous = self.state;
        self.state = next;
        if self.fade_duration > 0.0 && self.response == ResponseType::ColorSwap {
            self.fade = Some(Fade { from: self.color, elapsed: 0.0 });
        } else {
            self.fade = None;
            self.color = self.colors.get(next);
        }
        Some((previous, next))
    }

    pub(crate) fn set_interactable(&mut self, interactable: bool) -> ButtonResponse {
        self.interactable = interactable;
        self.pending = None;
        self.fade = None;
        let previous = self.state;
        self.state = if interactable { ButtonState::Normal } else { ButtonState::Disabled };
        self.color = self.colors.get(self.state);
        ButtonResponse {
            changed: (previous != self.state).then_some((previous, self.state)),
            repaint: true,
            ..ButtonResponse::default()
        }
    }

    pub(crate) fn on_mouse_over(&mut self) -> ButtonResponse {
        if !self.interactable || matches!(self.state, ButtonState::Pressed | ButtonState::Selected) {
            return ButtonResponse::default();
        }
        ButtonResponse::transition(self.go_to(ButtonState::Highlighted))
    }

    pub(crate) fn on_mouse_out(&mut self) -> ButtonResponse {
        if !self.interactable || matches!(self.state, ButtonState::Pressed | ButtonState::Selected) {
            return ButtonResponse::default();
        }
        ButtonResponse::transition(self.go_to(ButtonState::Normal))
    }

    pub(crate) fn on_button_down(&mut self, button: MouseButton, hovered: bool) -> ButtonResponse {
        if !self.interactable || button != MouseButton::Left {
            return ButtonResponse::default();
        }
        self.pending = None;
        let next = if hovered { ButtonState::Pressed } else { ButtonState::Normal };
        ButtonResponse {
            focus: Some(hovered),
            ..ButtonResponse::transition(self.go_to(next))
        }
    }

    pub(crate) fn on_button_up(&mut self, button: MouseButton, hovered: bool) -> ButtonResponse {
        if !self.interactable || button != MouseButton::Left || self.state != ButtonState::Pressed {
            return ButtonResponse::default();
        }
        ButtonResponse {
            clicked: hovered,
            ..ButtonResponse::transition(self.go_to(ButtonState::Selected))
        }
    }

    pub(crate) fn on_key_pressed(&mut self, key: KeyCode, focused: bool) -> ButtonResponse {
        if !self.interactable || !focused || !key.is_confirm() {
            return ButtonResponse::default();
        }
        let changed = self.go_to(ButtonState::Pressed);
        self.pending = Some(ButtonState::Selected);
        ButtonResponse { clicked: true, ..ButtonResponse::transition(changed) }
    }

    /// Advance the color blend, then apply a queued state once it settles
    pub(crate) fn update(&mut self, delta_time: f32) -> ButtonResponse {
        let mut response = ButtonResponse::default();

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += delta_time;
            let t = if self.fade_duration > 0.0 { fade.elapsed / self.fade_duration } else { 1.0 };
            self.color = utils::lerp_color(&fade.from, &self.colors.get(self.state), t);
            if t >= 1.0 {
                self.fade = None;
            }
            response.repaint = true;
        }

        if self.fade.is_none() {
            if let Some(next) = self.pending.take() {
                let changed = self.go_to(next);
                response.changed = changed;
                response.repaint |= changed.is_some();
            }
        }
        response
    }
}
