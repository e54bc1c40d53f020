// SPDX-License-Identifier: MPL-2.0
//! Application root: an issue form hosting the image attachment control.
//!
//! Files reach the control through the native picker, drag and drop, or the
//! path given on the command line. Reading happens off the UI thread; the
//! controller's ticket sequence makes sure only the newest read is applied.
//! With `--stdin-bridge`, data URIs and blobs also arrive over the message
//! bridge from allowed origins.

pub mod message;
pub mod subscription;
pub mod view;

pub use message::{Flags, Message};

use crate::application::port::{FileHandle, PickerError};
use crate::application::{
    Completion, ImageAttachmentController, IngestInput, IngestTicket, IssueForm,
    UploadControlView,
};
use crate::config;
use crate::domain::attachment::AttachmentSource;
use crate::i18n::I18n;
use crate::infrastructure::{FsFilePicker, LogSubmitter};
use crate::media::mime;
use crate::media::PreviewImage;
use iced::{window, Element, Subscription, Task};
use std::path::PathBuf;

const WINDOW_WIDTH: f32 = 640.0;
const WINDOW_HEIGHT: f32 = 560.0;

pub struct App {
    i18n: I18n,
    form: IssueForm<LogSubmitter>,
    /// Ticket of the file read in flight, if any.
    pending: Option<IngestTicket>,
    preview: Option<PreviewImage>,
    /// i18n key of the last status line.
    notice: Option<String>,
    allowed_origins: Vec<String>,
    stdin_bridge: bool,
}

/// Entry point used by `main.rs`.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);
        let controller = ImageAttachmentController::new(config.upload_policy());

        let mut app = App {
            i18n,
            form: IssueForm::new(controller, LogSubmitter),
            pending: None,
            preview: None,
            notice: config_warning,
            allowed_origins: config.allowed_origins(),
            stdin_bridge: flags.stdin_bridge,
        };

        let task = match flags.file_path {
            Some(path) => app.load_file(PathBuf::from(path)),
            None => Task::none(),
        };
        (app, task)
    }

    fn title(&self) -> String {
        match self.form.attachment().attachment().and_then(|a| a.file_name()) {
            Some(name) => format!("{name} - {}", self.i18n.tr("window-title")),
            None => self.i18n.tr("window-title"),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let file_drops = subscription::create_file_drop_subscription();
        if self.stdin_bridge {
            Subscription::batch([
                file_drops,
                subscription::create_stdin_bridge_subscription(self.allowed_origins.clone()),
            ])
        } else {
            file_drops
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StepsChanged(steps) => {
                self.form.steps_reproduce = steps;
                Task::none()
            }
            Message::PickImage => {
                let allow_list = &self.form.attachment().policy().allow_list;
                let (name, extensions) = mime::picker_filter(allow_list);
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .add_filter(name, extensions.as_slice())
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::PickImageResult,
                )
            }
            Message::PickImageResult(Some(path)) | Message::FileDropped(path) => {
                self.load_file(path)
            }
            Message::PickImageResult(None) => Task::none(),
            Message::FileLoaded { seq, result } => {
                self.finish_load(seq, result);
                Task::none()
            }
            Message::Bridge(message) => {
                if self.form.attachment_mut().ingest_message(message) {
                    // The controller already made any in-flight read stale.
                    self.pending = None;
                    self.refresh_preview();
                }
                Task::none()
            }
            Message::RemoveImage => {
                self.pending = None;
                self.form.attachment_mut().remove();
                self.refresh_preview();
                Task::none()
            }
            Message::Submit => {
                self.notice = Some(match self.form.submit() {
                    Ok(_) => "submit-success".to_string(),
                    Err(e) if self.form.can_submit() => {
                        tracing::error!(error = %e, "issue submission failed");
                        "submit-failed".to_string()
                    }
                    Err(_) => "submit-blocked".to_string(),
                });
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            steps_reproduce: &self.form.steps_reproduce,
            control: UploadControlView::from_controller(self.form.attachment()),
            preview: self.preview.as_ref(),
            pending: self.form.attachment().is_pending(),
            can_submit: self.form.can_submit(),
            notice: self.notice.as_deref(),
        })
    }

    /// Starts reading `path`; the previous attachment is replaced immediately.
    fn load_file(&mut self, path: PathBuf) -> Task<Message> {
        let ticket = self.form.attachment_mut().begin(AttachmentSource::File);
        let seq = ticket.seq();
        self.pending = Some(ticket);
        self.refresh_preview();

        Task::perform(FsFilePicker::read(path), move |result| Message::FileLoaded {
            seq,
            result,
        })
    }

    fn finish_load(&mut self, seq: u64, result: Result<FileHandle, PickerError>) {
        let Some(ticket) = self.pending.take_if(|ticket| ticket.seq() == seq) else {
            tracing::debug!(seq, "ignoring superseded file read");
            return;
        };

        let input = result.map(IngestInput::File).map_err(Into::into);
        if let Completion::Applied(validity) = self.form.attachment_mut().complete(ticket, input) {
            tracing::debug!(?validity, "file attachment applied");
        }
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview = self
            .form
            .attachment()
            .current_preview()
            .and_then(|uri| match PreviewImage::from_data_uri(uri) {
                Ok(preview) => Some(preview),
                Err(error) => {
                    tracing::warn!(%error, "preview could not be decoded");
                    None
                }
            });
    }
}
