//! Input event injection.
//!
//! The gesture pipeline emits input through the [`InputSink`] trait so that
//! the host-specific side effects stay swappable: the real implementation
//! drives the X11 XTest extension, while tests record the emitted events and
//! dry runs only log them.

use crate::error::{Error, Result};
use log::{debug, info};
use std::collections::HashMap;
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{
            ConnectionExt, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, KEY_PRESS_EVENT,
            KEY_RELEASE_EVENT, MOTION_NOTIFY_EVENT,
        },
        xtest::ConnectionExt as XTestConnectionExt,
    },
    rust_connection::RustConnection,
};

/// An X11 keysym identifying a key independent of keyboard layout
pub type Keysym = u32;

/// Fire-and-forget input event injection.
///
/// Implementations are assumed synchronous; the pipeline never retries a
/// failed injection.
pub trait InputSink {
    /// Move the cursor to an absolute display position
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press and hold a key
    fn key_down(&mut self, key: Keysym) -> Result<()>;

    /// Release a key
    fn key_up(&mut self, key: Keysym) -> Result<()>;

    /// Press and hold a pointer button
    fn button_down(&mut self, button: u8) -> Result<()>;

    /// Release a pointer button
    fn button_up(&mut self, button: u8) -> Result<()>;

    /// Press and immediately release a pointer button
    fn click(&mut self, button: u8) -> Result<()> {
        self.button_down(button)?;
        self.button_up(button)
    }
}

/// Input injection through the X11 XTest extension
pub struct X11InputSink {
    connection: RustConnection,
    screen: Screen,
    keycode_cache: HashMap<Keysym, u8>,
}

impl X11InputSink {
    /// Connect to the X server and verify the XTest extension is usable
    pub fn new() -> Result<Self> {
        info!("Initializing X11 input injection");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::InputInjection(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::InputInjection("Failed to get screen".to_string()))?
            .clone();

        let version = connection
            .xtest_get_version(2, 2)
            .map_err(|e| Error::InputInjection(format!("Failed to query XTest: {e}")))?
            .reply()
            .map_err(|e| Error::InputInjection(format!("XTest extension unavailable: {e}")))?;

        info!(
            "Connected to X11 display, screen: {}x{}, XTest {}.{}",
            screen.width_in_pixels, screen.height_in_pixels, version.major_version, version.minor_version
        );

        Ok(Self {
            connection,
            screen,
            keycode_cache: HashMap::new(),
        })
    }

    /// Display dimensions in pixels
    #[must_use]
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen.width_in_pixels, self.screen.height_in_pixels)
    }

    /// Resolve a keysym to a keycode using the server's keyboard mapping
    fn keycode_for(&mut self, keysym: Keysym) -> Result<u8> {
        if let Some(&keycode) = self.keycode_cache.get(&keysym) {
            return Ok(keycode);
        }

        let setup = self.connection.setup();
        let min_keycode = setup.min_keycode;
        let max_keycode = setup.max_keycode;
        let count = max_keycode - min_keycode + 1;

        let mapping = self
            .connection
            .get_keyboard_mapping(min_keycode, count)
            .map_err(|e| Error::InputInjection(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| Error::InputInjection(format!("Failed to get keyboard mapping: {e}")))?;

        let per_keycode = usize::from(mapping.keysyms_per_keycode);
        let index = mapping
            .keysyms
            .chunks(per_keycode.max(1))
            .position(|syms| syms.contains(&keysym))
            .ok_or_else(|| {
                Error::InputInjection(format!("No keycode maps to keysym {keysym:#x}"))
            })?;

        let keycode = min_keycode + u8::try_from(index).map_err(|_| {
            Error::InputInjection(format!("Keycode index {index} out of range"))
        })?;
        self.keycode_cache.insert(keysym, keycode);
        Ok(keycode)
    }

    fn fake_input(&self, event_type: u8, detail: u8, root_x: i16, root_y: i16) -> Result<()> {
        self.connection
            .xtest_fake_input(
                event_type,
                detail,
                x11rb::CURRENT_TIME,
                self.screen.root,
                root_x,
                root_y,
                0,
            )
            .map_err(|e| Error::InputInjection(format!("Failed to inject event: {e}")))?;
        self.connection
            .flush()
            .map_err(|e| Error::InputInjection(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }
}

impl InputSink for X11InputSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        // Clamp to screen bounds
        let max_x = i32::from(self.screen.width_in_pixels.saturating_sub(1));
        let max_y = i32::from(self.screen.height_in_pixels.saturating_sub(1));
        let x = x.clamp(0, max_x) as i16;
        let y = y.clamp(0, max_y) as i16;

        debug!("Moving cursor to ({}, {})", x, y);
        self.fake_input(MOTION_NOTIFY_EVENT, 0, x, y)
    }

    fn key_down(&mut self, key: Keysym) -> Result<()> {
        let keycode = self.keycode_for(key)?;
        debug!("Key down {:#x} (keycode {})", key, keycode);
        self.fake_input(KEY_PRESS_EVENT, keycode, 0, 0)
    }

    fn key_up(&mut self, key: Keysym) -> Result<()> {
        let keycode = self.keycode_for(key)?;
        debug!("Key up {:#x} (keycode {})", key, keycode);
        self.fake_input(KEY_RELEASE_EVENT, keycode, 0, 0)
    }

    fn button_down(&mut self, button: u8) -> Result<()> {
        debug!("Button {} down", button);
        self.fake_input(BUTTON_PRESS_EVENT, button, 0, 0)
    }

    fn button_up(&mut self, button: u8) -> Result<()> {
        debug!("Button {} up", button);
        self.fake_input(BUTTON_RELEASE_EVENT, button, 0, 0)
    }
}

/// Sink that logs events instead of injecting them, for dry runs
#[derive(Debug, Default)]
pub struct LoggingSink;

impl InputSink for LoggingSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        info!("move cursor to ({x}, {y})");
        Ok(())
    }

    fn key_down(&mut self, key: Keysym) -> Result<()> {
        info!("key down {key:#x}");
        Ok(())
    }

    fn key_up(&mut self, key: Keysym) -> Result<()> {
        info!("key up {key:#x}");
        Ok(())
    }

    fn button_down(&mut self, button: u8) -> Result<()> {
        info!("button {button} down");
        Ok(())
    }

    fn button_up(&mut self, button: u8) -> Result<()> {
        info!("button {button} up");
        Ok(())
    }
}

/// One recorded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveCursor(i32, i32),
    KeyDown(Keysym),
    KeyUp(Keysym),
    ButtonDown(u8),
    ButtonUp(u8),
    Click(u8),
}

/// Sink that records every emitted event, for tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Events in emission order
    pub events: Vec<InputEvent>,
}

impl RecordingSink {
    /// Create an empty recording sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Count of recorded events matching a predicate
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&InputEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl InputSink for RecordingSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.events.push(InputEvent::MoveCursor(x, y));
        Ok(())
    }

    fn key_down(&mut self, key: Keysym) -> Result<()> {
        self.events.push(InputEvent::KeyDown(key));
        Ok(())
    }

    fn key_up(&mut self, key: Keysym) -> Result<()> {
        self.events.push(InputEvent::KeyUp(key));
        Ok(())
    }

    fn button_down(&mut self, button: u8) -> Result<()> {
        self.events.push(InputEvent::ButtonDown(button));
        Ok(())
    }

    fn button_up(&mut self, button: u8) -> Result<()> {
        self.events.push(InputEvent::ButtonUp(button));
        Ok(())
    }

    fn click(&mut self, button: u8) -> Result<()> {
        self.events.push(InputEvent::Click(button));
        Ok(())
    }
}
