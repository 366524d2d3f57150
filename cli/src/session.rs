//! The interactive loop: image collection, filter rounds and animation

use crate::animation::Animation;
use crate::config::AnimationConfig;
use crate::prompt::{
    FilterChoice, MenuChoice, Prompter, RampChoice, clean_path, parse_brightness,
    parse_custom_ramp, parse_delay, parse_filter_options, parse_loops, parse_menu_choice,
    parse_order, parse_ramp_choice,
};
use glyphcast::{GlyphRamp, LoadError, RampPreset, RasterImage, Surface};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const GREETING: &str = "Welcome to glyphcast!";

const FILTER_MENU: &str = "\
Choose which filter(s) to apply (up to 4 numbers separated by spaces):
0. No filter
1. Negate image
2. Mirror image
3. Change brightness
4. Change glyph ramp
5. Back to image list";

/// Whether the session keeps going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W, S> {
    prompter: Prompter<R, W>,
    surface: S,
    images: Vec<RasterImage>,
    /// Ramp given to newly added images
    ramp: GlyphRamp,
    animation: AnimationConfig,
    splash: Option<PathBuf>,
    sleep: fn(Duration),
}

impl<R: BufRead, W: Write, S: Surface> Session<R, W, S> {
    pub fn new(prompter: Prompter<R, W>, surface: S, ramp: GlyphRamp) -> Self {
        Self {
            prompter,
            surface,
            images: Vec::new(),
            ramp,
            animation: AnimationConfig::default(),
            splash: None,
            sleep: std::thread::sleep,
        }
    }

    /// Defaults for animation prompts left empty
    pub fn with_animation_defaults(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_splash(mut self, splash: Option<PathBuf>) -> Self {
        self.splash = splash;
        self
    }

    /// Replace the pause between animation frames
    pub fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    #[cfg(test)]
    pub fn images(&self) -> &[RasterImage] {
        &self.images
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn prompter(&self) -> &Prompter<R, W> {
        &self.prompter
    }

    /// Load `path` and append it to the collection
    ///
    /// The collection is untouched on failure.
    pub fn add_path(&mut self, path: &Path) -> Result<&RasterImage, LoadError> {
        let image = RasterImage::load(path, self.ramp.clone())?;
        log::info!(
            "added {} ({}x{} {})",
            path.display(),
            image.width(),
            image.height(),
            image.format()
        );
        self.images.push(image);
        Ok(&self.images[self.images.len() - 1])
    }

    /// Greet, then serve the main menu until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        self.welcome()?;

        loop {
            let Some(choice) = self.main_menu()? else {
                break;
            };
            let flow = match choice {
                MenuChoice::Edit(index) => self.edit_image(index)?,
                MenuChoice::Add => self.add_image()?,
                MenuChoice::Animate => self.animate()?,
                MenuChoice::Quit => Flow::Quit,
            };
            if flow == Flow::Quit {
                break;
            }
        }

        log::debug!("session over with {} images", self.images.len());
        Ok(())
    }

    fn welcome(&mut self) -> io::Result<()> {
        let splash = self.splash.clone();
        let shown = match splash {
            Some(path) => match RasterImage::load(&path, self.ramp.clone()) {
                Ok(mut image) => {
                    image.display(&mut self.surface)?;
                    true
                }
                Err(e) => {
                    log::warn!("skipping splash image: {e}");
                    false
                }
            },
            None => false,
        };
        if !shown {
            self.surface.clear_and_home()?;
            self.surface.flush()?;
        }
        self.prompter.say(GREETING)
    }

    fn main_menu(&mut self) -> io::Result<Option<MenuChoice>> {
        let mut menu = String::from("Choose what you want to do:");
        for (i, image) in self.images.iter().enumerate() {
            menu.push_str(&format!("\n{}. Edit {}", i + 1, image.path().display()));
        }
        let n = self.images.len();
        menu.push_str(&format!(
            "\n{}. Add image\n{}. Show animation\n{}. Quit",
            n + 1,
            n + 2,
            n + 3
        ));

        self.prompter.ask(&menu, |line| parse_menu_choice(line, n))
    }

    fn add_image(&mut self) -> io::Result<Flow> {
        self.prompter
            .say("Write a path to a JPEG or 24-bit BMP image, or drop it here:")?;
        let Some(line) = self.prompter.read_line()? else {
            return Ok(Flow::Quit);
        };
        let path = clean_path(line);

        if path.as_os_str().is_empty() {
            self.prompter.say("Try again!")?;
            return Ok(Flow::Continue);
        }

        match self.add_path(&path).map(|_| ()) {
            Ok(()) => {
                let term = self.surface.size()?;
                if let Some(image) = self.images.last_mut() {
                    image.resize_ascii_image(term);
                }
                self.prompter.say(&format!("Added {}", path.display()))?;
            }
            Err(e) => {
                self.prompter.say(&e.to_string())?;
                self.prompter.say("Try again!")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Filter rounds on one image until the user goes back
    ///
    /// Every round starts again from the unfiltered grayscale grid.
    fn edit_image(&mut self, index: usize) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.prompter.ask(FILTER_MENU, parse_filter_options)? else {
                return Ok(Flow::Quit);
            };
            let filters = match choice {
                FilterChoice::Back => return Ok(Flow::Continue),
                FilterChoice::Apply(filters) => filters,
            };

            let brightness = if filters.brightness {
                match self
                    .prompter
                    .ask("Enter the brightness change (from -255 to 255):", parse_brightness)?
                {
                    Some(delta) => Some(delta),
                    None => return Ok(Flow::Quit),
                }
            } else {
                None
            };
            let ramp = if filters.ramp {
                match self.ask_ramp()? {
                    Some(ramp) => Some(ramp),
                    None => return Ok(Flow::Quit),
                }
            } else {
                None
            };

            let image = &mut self.images[index];
            image.to_grey_scale();
            if filters.negate {
                image.negate_image();
            }
            if filters.mirror {
                image.mirror_image();
            }
            if let Some(delta) = brightness {
                image.change_brightness(delta);
            }
            match ramp {
                Some(ramp) => image.set_ramp(ramp),
                None => image.convert_grey_to_ascii(),
            }
            image.display(&mut self.surface)?;
        }
    }

    fn ask_ramp(&mut self) -> io::Result<Option<GlyphRamp>> {
        let menu = format!(
            "Choose a glyph ramp:\n1. {}\n2. {}\n3. Your own",
            RampPreset::Dense.chars(),
            RampPreset::Sparse.chars()
        );
        let Some(choice) = self.prompter.ask(&menu, parse_ramp_choice)? else {
            return Ok(None);
        };

        match choice {
            RampChoice::Preset(preset) => Ok(Some(preset.ramp())),
            RampChoice::Custom => self.prompter.ask(
                "Enter your own ramp, at least 2 characters, darkest first:",
                parse_custom_ramp,
            ),
        }
    }

    fn animate(&mut self) -> io::Result<Flow> {
        if self.images.is_empty() {
            self.prompter.say("Add an image before starting an animation")?;
            return Ok(Flow::Continue);
        }

        let default_delay = self.animation.delay().unwrap_or_default();
        let Some(delay) = self.prompter.ask(
            &format!(
                "Enter the delay between frames in seconds [{}]:",
                default_delay.as_secs_f64()
            ),
            |line| {
                if line.trim().is_empty() {
                    Some(default_delay)
                } else {
                    parse_delay(line)
                }
            },
        )?
        else {
            return Ok(Flow::Quit);
        };

        let default_loops = self.animation.loops;
        let Some(loops) = self.prompter.ask(
            &format!("Enter the number of loops [{default_loops}]:"),
            |line| {
                if line.trim().is_empty() {
                    Some(default_loops)
                } else {
                    parse_loops(line)
                }
            },
        )?
        else {
            return Ok(Flow::Quit);
        };

        for (i, image) in self.images.iter().enumerate() {
            self.prompter
                .say(&format!("{}. {}", i + 1, image.path().display()))?;
        }
        let count = self.images.len();
        let Some(order) = self.prompter.ask(
            "Enter the order of images (0 for all):",
            |line| parse_order(line, count),
        )?
        else {
            return Ok(Flow::Quit);
        };

        let animation = Animation {
            delay,
            loops,
            order,
        };
        animation.play(&mut self.images, &mut self.surface, self.sleep)?;
        Ok(Flow::Continue)
    }
}
