// SPDX-License-Identifier: MPL-2.0
//! Layout of the issue form window.

use super::Message;
use crate::application::UploadControlView;
use crate::i18n::I18n;
use crate::media::PreviewImage;
use iced::widget::{button, column, container, image, row, text, text_input};
use iced::{Color, Element, Length};

const PREVIEW_MAX_WIDTH: f32 = 320.0;
const ERROR_COLOR: Color = Color::from_rgb(0.8, 0.2, 0.2);

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub steps_reproduce: &'a str,
    pub control: UploadControlView,
    pub preview: Option<&'a PreviewImage>,
    pub pending: bool,
    pub can_submit: bool,
    pub notice: Option<&'a str>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let steps = column![
        text(i18n.tr("steps-reproduce-label")),
        text_input(&i18n.tr("steps-reproduce-placeholder"), ctx.steps_reproduce)
            .on_input(Message::StepsChanged),
    ]
    .spacing(6);

    let submit = button(text(i18n.tr("submit-button")))
        .on_press_maybe(ctx.can_submit.then_some(Message::Submit));

    let mut content = column![steps, upload_control(&ctx), submit]
        .spacing(16)
        .padding(20);
    if let Some(key) = ctx.notice {
        content = content.push(text(i18n.tr(key)));
    }

    container(content).width(Length::Fill).into()
}

fn upload_control<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let control = &ctx.control;

    let mut body = column![].spacing(8);

    if let Some(preview) = ctx.preview {
        let width = (preview.width as f32).min(PREVIEW_MAX_WIDTH);
        body = body.push(image(preview.handle.clone()).width(Length::Fixed(width)));
    }

    if let Some(error) = &control.error {
        body = body.push(text(i18n.tr_error(error)).color(ERROR_COLOR));
    }

    let mut actions = row![].spacing(8);
    if control.label_visible {
        actions = actions.push(text(i18n.tr("upload-label")));
    }
    actions = actions.push(button(text(i18n.tr("upload-choose"))).on_press(Message::PickImage));
    if control.remove_visible {
        actions = actions
            .push(button(text(i18n.tr("upload-remove"))).on_press(Message::RemoveImage));
    }
    body = body.push(actions);

    if ctx.pending {
        body = body.push(text(i18n.tr("upload-pending")));
    }

    container(body).padding(10).into()
}
