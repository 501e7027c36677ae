use super::layout::{self, BLOCK_SPACING_PX, SECTION_PADDING_PX, SECTION_TITLE_SIZE_PX};
use super::messages::Message;
use super::state::{App, NAV_BAR_HEIGHT_PX, PROGRESS_BAR_HEIGHT_PX, SECTIONS_SCROLL_ID};
use folio_core::config::ThemeMode;
use iced::alignment::Vertical;
use iced::widget::text::LineHeight;
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, progress_bar, scrollable, text,
};
use iced::{Element, Length, Theme};

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let progress = progress_bar(0.0..=1.0, self.tracker.scroll_progress())
            .height(Length::Fixed(PROGRESS_BAR_HEIGHT_PX));

        let mut sections = Column::new().width(Length::Fill);
        for (id, height) in layout::section_heights(self) {
            sections = sections.push(self.section_view(&id, height));
        }

        let body = scrollable(sections)
            .id(SECTIONS_SCROLL_ID.clone())
            .on_scroll(|viewport| Message::Scrolled {
                offset_y: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .width(Length::Fill)
            .height(Length::Fill);

        column![self.nav_bar(), progress, body].into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let active = self.tracker.active_section_id();
        let mut nav = Row::new()
            .spacing(8)
            .padding([0, 16])
            .height(Length::Fixed(NAV_BAR_HEIGHT_PX))
            .align_y(Vertical::Center);

        for section in &self.content.sections {
            let style: ButtonStyle = if section.id == active {
                button::primary
            } else {
                button::text
            };
            nav = nav.push(
                button(text(section.title.clone()))
                    .style(style)
                    .on_press(Message::NavigateTo(section.id.clone())),
            );
        }

        nav = nav.push(horizontal_space());
        if self.tracker.show_back_to_top() {
            nav = nav.push(
                button("Top")
                    .style(button::secondary)
                    .on_press(Message::BackToTop),
            );
        }
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        nav = nav.push(button(theme_label).on_press(Message::ToggleTheme));

        nav.into()
    }

    fn section_view(&self, id: &str, height: f32) -> Element<'_, Message> {
        let title = self.content.section_title(id).unwrap_or(id).to_string();
        let font_size = self.config.font_size as f32;
        let line_height = LineHeight::Relative(self.config.line_spacing.max(1.0));

        let mut body = Column::new()
            .spacing(BLOCK_SPACING_PX)
            .push(text(title).size(SECTION_TITLE_SIZE_PX));
        for block in layout::section_blocks(self, id) {
            body = body.push(text(block).size(font_size).line_height(line_height));
        }

        container(body)
            .padding(SECTION_PADDING_PX)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    }
}
