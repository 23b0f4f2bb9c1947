use crate::calendar::{MonthGroup, MonthView};
use crate::config::Settings;

/// Renders the public calendar widget. All requested months are
/// embedded as a JSON literal; navigation is client-local over that
/// array, no refetch per month.
pub fn render_calendar(
    title: &str,
    months: &[MonthView],
    settings: &Settings,
) -> Result<String, serde_json::Error> {
    let months_json = embed_json(&serde_json::to_string(months)?);

    let legend_block = if settings.legend_text.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"legend-text\">{}</div>",
            escape_html(&settings.legend_text)
        )
    };

    let day_headers: String = settings
        .locale
        .day_names
        .iter()
        .map(|name| {
            let short: String = name.chars().take(2).collect();
            format!("<div class=\"oh-day-header\">{}</div>", escape_html(&short))
        })
        .collect();

    Ok(CALENDAR_HTML
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{CSS_VARS}}", &css_vars(settings))
        .replace("{{DAY_HEADERS}}", &day_headers)
        .replace("{{LEGEND_BLOCK}}", &legend_block)
        .replace("{{OPEN_LABEL}}", &escape_html(&settings.locale.open_label))
        .replace("{{CLOSED_LABEL}}", &escape_html(&settings.locale.closed_label))
        .replace("{{HOURS_LABEL}}", &escape_html(&settings.locale.hours_label))
        .replace("{{MONTHS_JSON}}", &months_json))
}

/// Renders the grouped list view entirely server-side; it has no
/// interactivity, so no script is shipped with it.
pub fn render_list(title: &str, groups: &[MonthGroup], settings: &Settings) -> String {
    let closed_label = escape_html(&settings.locale.closed_label);

    let body = if groups.is_empty() {
        "<div class=\"oh-empty\">No opening hours available at this time.</div>".to_string()
    } else {
        let mut html = String::new();
        for group in groups {
            html.push_str("<section class=\"oh-list-month\">");
            html.push_str(&format!(
                "<h3 class=\"oh-list-month-title\">{}</h3>",
                escape_html(&group.title)
            ));
            html.push_str("<div class=\"oh-list-dates\">");
            for entry in &group.dates {
                let mut classes = String::from("oh-list-date");
                if entry.has_special {
                    classes.push_str(" has-special");
                }
                if !entry.is_enabled {
                    classes.push_str(" disabled");
                }
                html.push_str(&format!("<div class=\"{classes}\">"));
                html.push_str(&format!(
                    "<span class=\"list-date\">{}</span>",
                    escape_html(&entry.display_date)
                ));
                html.push_str(&format!(
                    "<span class=\"list-day\">{}</span>",
                    escape_html(&entry.day_name)
                ));
                if entry.is_enabled {
                    // Closing time first: right-to-left reading order.
                    html.push_str(&format!(
                        "<span class=\"list-hours\">{}-{}</span>",
                        escape_html(&entry.closing),
                        escape_html(&entry.opening)
                    ));
                    if entry.has_special {
                        html.push_str(&format!(
                            "<span class=\"list-special\">{}</span>",
                            escape_html(&entry.note)
                        ));
                    }
                } else {
                    let label = if entry.has_special {
                        escape_html(&entry.note)
                    } else {
                        closed_label.clone()
                    };
                    html.push_str(&format!(
                        "<span class=\"list-hours list-closed\">{label}</span>"
                    ));
                }
                html.push_str("</div>");
            }
            html.push_str("</div></section>");
        }
        html
    };

    LIST_HTML
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{CSS_VARS}}", &css_vars(settings))
        .replace("{{BODY}}", &body)
}

/// Renders the admin editor. The page itself is public; every write it
/// performs goes through the bearer-token API.
pub fn render_admin(settings: &Settings) -> Result<String, serde_json::Error> {
    let settings_json = embed_json(&serde_json::to_string(settings)?);
    Ok(ADMIN_HTML
        .replace("{{CSS_VARS}}", &css_vars(settings))
        .replace("{{SETTINGS_JSON}}", &settings_json))
}

fn css_vars(settings: &Settings) -> String {
    let colors = &settings.colors;
    format!(
        "--oh-enabled-bg: {}; --oh-disabled-bg: {}; --oh-text: {}; --oh-special: {}; --oh-accent: {};",
        escape_html(&colors.enabled_bg),
        escape_html(&colors.disabled_bg),
        escape_html(&colors.text),
        escape_html(&colors.special_highlight),
        escape_html(&colors.primary_accent)
    )
}

/// Keeps embedded JSON from terminating the inline script early.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const CALENDAR_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root { {{CSS_VARS}} }
    body {
      margin: 0;
      padding: 24px 12px;
      color: var(--oh-text);
      font-family: system-ui, sans-serif;
      background: #fafafa;
      display: grid;
      place-items: start center;
    }
    .oh-widget {
      width: min(640px, 100%);
      background: white;
      border: 1px solid #e2e2e2;
      border-radius: 12px;
      padding: 20px;
    }
    .oh-title { margin: 0 0 12px; font-size: 1.5rem; }
    .oh-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 12px;
    }
    .oh-nav h3 { margin: 0; font-size: 1.1rem; }
    .oh-nav button {
      border: 1px solid #d0d0d0;
      background: white;
      border-radius: 8px;
      padding: 4px 14px;
      font-size: 1.1rem;
      cursor: pointer;
    }
    .oh-nav button:disabled { opacity: 0.35; cursor: default; }
    .oh-header-row, .oh-days {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }
    .oh-day-header {
      text-align: center;
      font-size: 0.8rem;
      font-weight: 600;
      padding: 4px 0;
      color: #777;
    }
    .oh-day {
      min-height: 52px;
      border-radius: 8px;
      padding: 4px;
      font-size: 0.85rem;
      background: var(--oh-disabled-bg);
      text-align: center;
    }
    .oh-day.enabled {
      background: var(--oh-enabled-bg);
      color: white;
      cursor: pointer;
    }
    .oh-day.disabled-marked {
      background: var(--oh-disabled-bg);
      outline: 1px dashed #bbb;
      cursor: pointer;
    }
    .oh-day.empty { background: transparent; }
    .oh-day.has-special { box-shadow: inset 0 0 0 2px var(--oh-special); }
    .oh-day .day-status { font-size: 0.7rem; margin-top: 2px; }
    .oh-legend {
      display: flex;
      flex-direction: column;
      gap: 6px;
      margin-top: 14px;
      font-size: 0.85rem;
    }
    .legend-items { display: flex; gap: 16px; }
    .legend-item { display: flex; align-items: center; gap: 6px; }
    .legend-circle {
      width: 12px;
      height: 12px;
      border-radius: 50%;
      display: inline-block;
    }
    .legend-circle.open { background: var(--oh-enabled-bg); }
    .legend-circle.closed { background: var(--oh-disabled-bg); border: 1px solid #ccc; }
    .oh-modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.45);
      display: none;
      place-items: center;
    }
    .oh-modal.visible { display: grid; }
    .oh-modal-content {
      background: white;
      border-radius: 12px;
      padding: 20px 28px;
      width: min(320px, 90vw);
      position: relative;
    }
    .oh-modal-close {
      position: absolute;
      top: 8px;
      right: 14px;
      font-size: 1.4rem;
      cursor: pointer;
    }
    .modal-times { font-size: 1.3rem; font-weight: 600; color: var(--oh-accent); }
    .modal-closed { font-size: 1.1rem; font-weight: 600; }
    .modal-note {
      margin-top: 10px;
      padding: 8px;
      border-radius: 8px;
      background: #fff7ea;
      border: 1px solid var(--oh-special);
    }
  </style>
</head>
<body>
  <div class="oh-widget">
    <h2 class="oh-title">{{TITLE}}</h2>
    <div class="oh-nav">
      <button type="button" id="oh-prev" aria-label="Previous month">&lsaquo;</button>
      <h3 id="oh-month-title"></h3>
      <button type="button" id="oh-next" aria-label="Next month">&rsaquo;</button>
    </div>
    <div class="oh-header-row">{{DAY_HEADERS}}</div>
    <div class="oh-days" id="oh-days"></div>
    <div class="oh-legend">
      {{LEGEND_BLOCK}}
      <div class="legend-items">
        <div class="legend-item"><span class="legend-circle open"></span><span>{{OPEN_LABEL}}</span></div>
        <div class="legend-item"><span class="legend-circle closed"></span><span>{{CLOSED_LABEL}}</span></div>
      </div>
    </div>
    <div class="oh-modal" id="oh-modal">
      <div class="oh-modal-content">
        <span class="oh-modal-close" id="oh-modal-close">&times;</span>
        <h3 id="oh-modal-date"></h3>
        <div id="oh-modal-day"></div>
        <div class="oh-modal-hours">
          <div>{{HOURS_LABEL}}</div>
          <div id="oh-modal-times"></div>
        </div>
        <div id="oh-modal-note"></div>
      </div>
    </div>
  </div>

  <script>
    const monthsData = {{MONTHS_JSON}};
    const closedLabel = '{{CLOSED_LABEL}}';

    let monthIndex = 0;

    const daysEl = document.getElementById('oh-days');
    const titleEl = document.getElementById('oh-month-title');
    const prevBtn = document.getElementById('oh-prev');
    const nextBtn = document.getElementById('oh-next');
    const modalEl = document.getElementById('oh-modal');

    const escapeHtml = (text) => {
      if (!text) return '';
      const map = { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#039;' };
      return String(text).replace(/[&<>"']/g, (m) => map[m]);
    };

    const formatDate = (iso) => {
      const [year, month, day] = iso.split('-');
      return day + '/' + month + '/' + year;
    };

    const updateNav = () => {
      prevBtn.disabled = monthIndex === 0;
      nextBtn.disabled = monthIndex === monthsData.length - 1;
    };

    const renderMonth = () => {
      const monthData = monthsData[monthIndex];
      titleEl.textContent = monthData.title;

      let html = '';
      for (let i = 0; i < monthData.first_day; i += 1) {
        html += '<div class="oh-day empty"></div>';
      }
      monthData.days.forEach((day, index) => {
        let classes = 'oh-day';
        if (day.enabled) {
          classes += ' enabled';
        } else if (day.disabled_marked) {
          classes += ' disabled-marked';
        }
        if (day.has_special) {
          classes += ' has-special';
        }
        html += '<div class="' + classes + '" data-index="' + index + '">';
        html += '<div class="day-number">' + day.day + '</div>';
        if (day.disabled_marked) {
          html += '<div class="day-status">' + escapeHtml(day.note || closedLabel) + '</div>';
        }
        html += '</div>';
      });
      daysEl.innerHTML = html;

      // Unset days stay non-interactive: only stored records open the
      // detail overlay.
      daysEl.querySelectorAll('.oh-day.enabled, .oh-day.disabled-marked').forEach((cell) => {
        cell.addEventListener('click', () => showModal(monthData.days[cell.dataset.index]));
      });
      updateNav();
    };

    const showModal = (day) => {
      document.getElementById('oh-modal-date').textContent = formatDate(day.date);
      document.getElementById('oh-modal-day').textContent = day.day_name;

      const timesEl = document.getElementById('oh-modal-times');
      if (day.disabled_marked) {
        timesEl.innerHTML = '<div class="modal-closed">' + closedLabel + '</div>';
      } else {
        timesEl.innerHTML = '<div class="modal-times">' +
          escapeHtml(day.closing) + ' - ' + escapeHtml(day.opening) + '</div>';
      }

      const noteEl = document.getElementById('oh-modal-note');
      if (day.note) {
        noteEl.innerHTML = '<div class="modal-note">' + escapeHtml(day.note) + '</div>';
        noteEl.style.display = '';
      } else {
        noteEl.style.display = 'none';
      }
      modalEl.classList.add('visible');
    };

    prevBtn.addEventListener('click', () => {
      if (monthIndex > 0) {
        monthIndex -= 1;
        renderMonth();
      }
    });
    nextBtn.addEventListener('click', () => {
      if (monthIndex < monthsData.length - 1) {
        monthIndex += 1;
        renderMonth();
      }
    });
    document.getElementById('oh-modal-close').addEventListener('click', () => {
      modalEl.classList.remove('visible');
    });
    modalEl.addEventListener('click', (event) => {
      if (event.target === modalEl) {
        modalEl.classList.remove('visible');
      }
    });

    if (monthsData.length) {
      renderMonth();
    }
  </script>
</body>
</html>
"##;

const LIST_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root { {{CSS_VARS}} }
    body {
      margin: 0;
      padding: 24px 12px;
      color: var(--oh-text);
      font-family: system-ui, sans-serif;
      background: #fafafa;
      display: grid;
      place-items: start center;
    }
    .oh-list {
      width: min(560px, 100%);
      background: white;
      border: 1px solid #e2e2e2;
      border-radius: 12px;
      padding: 20px;
    }
    .oh-title { margin: 0 0 12px; font-size: 1.5rem; }
    .oh-list-month-title {
      margin: 16px 0 8px;
      font-size: 1.1rem;
      color: var(--oh-accent);
    }
    .oh-list-date {
      display: flex;
      gap: 12px;
      align-items: baseline;
      padding: 6px 8px;
      border-bottom: 1px solid #f0f0f0;
    }
    .oh-list-date.disabled { color: #999; }
    .list-date { font-variant-numeric: tabular-nums; }
    .list-day { flex: 1; }
    .list-hours { font-weight: 600; }
    .list-closed { font-weight: 600; }
    .list-special { color: var(--oh-special); }
    .oh-empty { padding: 12px; color: #777; }
  </style>
</head>
<body>
  <div class="oh-list">
    <h2 class="oh-title">{{TITLE}}</h2>
    {{BODY}}
  </div>
</body>
</html>
"##;

const ADMIN_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Opening Hours Admin</title>
  <style>
    :root { {{CSS_VARS}} }
    body {
      margin: 0;
      padding: 24px 12px;
      color: var(--oh-text);
      font-family: system-ui, sans-serif;
      background: #fafafa;
      display: grid;
      place-items: start center;
      gap: 20px;
    }
    .panel {
      width: min(720px, 100%);
      background: white;
      border: 1px solid #e2e2e2;
      border-radius: 12px;
      padding: 20px;
    }
    h2 { margin: 0 0 12px; }
    .nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 12px;
    }
    .nav h3 { margin: 0; }
    button {
      border: 1px solid #d0d0d0;
      background: white;
      border-radius: 8px;
      padding: 6px 14px;
      cursor: pointer;
    }
    button.primary {
      background: var(--oh-accent);
      border-color: var(--oh-accent);
      color: white;
    }
    button.danger { color: #c62828; border-color: #c62828; }
    button:disabled { opacity: 0.5; cursor: default; }
    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }
    .cell {
      min-height: 56px;
      border-radius: 8px;
      padding: 4px;
      font-size: 0.85rem;
      background: #fdfdfd;
      border: 1px solid #eee;
      cursor: pointer;
      text-align: center;
    }
    .cell.enabled { background: var(--oh-enabled-bg); color: white; }
    .cell.disabled-marked { background: var(--oh-disabled-bg); }
    .cell.has-special { box-shadow: inset 0 0 0 2px var(--oh-special); }
    .cell.empty { background: transparent; border: none; cursor: default; }
    .cell .hours { font-size: 0.7rem; }
    .header-cell {
      text-align: center;
      font-size: 0.8rem;
      font-weight: 600;
      color: #777;
      padding: 4px 0;
    }
    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.45);
      display: none;
      place-items: center;
    }
    .modal.visible { display: grid; }
    .modal-content {
      background: white;
      border-radius: 12px;
      padding: 20px;
      width: min(340px, 92vw);
    }
    .field { display: grid; gap: 4px; margin-bottom: 10px; }
    .field label { font-size: 0.85rem; color: #555; }
    .field input[type='time'], .field input[type='date'], .field input[type='text'] {
      padding: 6px 8px;
      border: 1px solid #ccc;
      border-radius: 6px;
    }
    .row { display: flex; gap: 8px; justify-content: flex-end; margin-top: 12px; }
    .range-fields {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 10px;
    }
  </style>
</head>
<body>
  <div class="panel">
    <h2>Calendar</h2>
    <div class="nav">
      <button type="button" id="prev-month">&lsaquo;</button>
      <h3 id="month-title"></h3>
      <button type="button" id="next-month">&rsaquo;</button>
    </div>
    <div class="grid" id="header-row"></div>
    <div class="grid" id="calendar-grid"></div>
  </div>

  <div class="panel">
    <h2>Apply to date range</h2>
    <div class="range-fields">
      <div class="field"><label for="range-start">Start date</label><input type="date" id="range-start" /></div>
      <div class="field"><label for="range-end">End date</label><input type="date" id="range-end" /></div>
      <div class="field"><label for="range-opening">Opening</label><input type="time" id="range-opening" /></div>
      <div class="field"><label for="range-closing">Closing</label><input type="time" id="range-closing" /></div>
      <div class="field"><label for="range-note">Note</label><input type="text" id="range-note" /></div>
      <div class="field"><label for="range-enabled">Open</label><input type="checkbox" id="range-enabled" checked /></div>
    </div>
    <div class="row">
      <button type="button" class="primary" id="apply-range">Apply to range</button>
    </div>
  </div>

  <div class="modal" id="date-modal">
    <div class="modal-content">
      <h3 id="modal-title"></h3>
      <form id="date-form">
        <input type="hidden" id="date-value" />
        <div class="field"><label for="opening-time">Opening time</label><input type="time" id="opening-time" required /></div>
        <div class="field"><label for="closing-time">Closing time</label><input type="time" id="closing-time" required /></div>
        <div class="field"><label for="special-note">Special note</label><input type="text" id="special-note" /></div>
        <div class="field"><label><input type="checkbox" id="is-enabled" checked /> Open on this date</label></div>
        <div class="row">
          <button type="button" class="danger" id="delete-date">Delete</button>
          <button type="button" id="close-modal">Cancel</button>
          <button type="submit" class="primary">Save</button>
        </div>
      </form>
    </div>
  </div>

  <script>
    const settings = {{SETTINGS_JSON}};

    let current = new Date();
    let allDates = {};

    const tokenKey = 'oh_admin_token';

    const adminToken = () => {
      let token = localStorage.getItem(tokenKey);
      if (!token) {
        token = prompt('Admin token:') || '';
        localStorage.setItem(tokenKey, token);
      }
      return token;
    };

    const api = async (path, options = {}) => {
      const headers = Object.assign(
        { 'content-type': 'application/json', authorization: 'Bearer ' + adminToken() },
        options.headers || {}
      );
      const response = await fetch(path, Object.assign({}, options, { headers }));
      if (response.status === 401 || response.status === 403) {
        localStorage.removeItem(tokenKey);
      }
      const body = await response.json().catch(() => ({}));
      if (!response.ok || body.success === false) {
        throw new Error(body.message || 'Request failed');
      }
      return body;
    };

    const pad = (value) => String(value).padStart(2, '0');
    const dateKey = (year, month, day) => year + '-' + pad(month) + '-' + pad(day);

    const loadDates = async () => {
      try {
        const body = await api('/api/dates?enabled_only=false');
        allDates = {};
        (body.data || []).forEach((record) => {
          allDates[record.date] = record;
        });
        renderCalendar();
      } catch (err) {
        alert('Failed to load dates: ' + err.message);
      }
    };

    const renderHeaders = () => {
      document.getElementById('header-row').innerHTML = settings.locale.day_names
        .map((name) => '<div class="header-cell">' + name.slice(0, 2) + '</div>')
        .join('');
    };

    const renderCalendar = () => {
      const year = current.getFullYear();
      const month = current.getMonth();
      document.getElementById('month-title').textContent =
        settings.locale.month_names[month] + ' ' + year;

      const firstDay = new Date(year, month, 1).getDay();
      const daysInMonth = new Date(year, month + 1, 0).getDate();

      let html = '';
      for (let i = 0; i < firstDay; i += 1) {
        html += '<div class="cell empty"></div>';
      }
      for (let day = 1; day <= daysInMonth; day += 1) {
        const key = dateKey(year, month + 1, day);
        const record = allDates[key];
        let classes = 'cell';
        let hours = '';
        if (record) {
          classes += record.is_enabled ? ' enabled' : ' disabled-marked';
          if (record.special_note) {
            classes += ' has-special';
          }
          hours = record.is_enabled
            ? record.opening_time.slice(0, 5) + '-' + record.closing_time.slice(0, 5)
            : record.special_note || settings.locale.closed_label;
        }
        html += '<div class="' + classes + '" data-date="' + key + '">' +
          '<div>' + day + '</div><div class="hours">' + hours + '</div></div>';
      }
      const grid = document.getElementById('calendar-grid');
      grid.innerHTML = html;
      grid.querySelectorAll('.cell[data-date]').forEach((cell) => {
        cell.addEventListener('click', () => openModal(cell.dataset.date));
      });
    };

    const openModal = (date) => {
      const record = allDates[date];
      document.getElementById('modal-title').textContent = date;
      document.getElementById('date-value').value = date;
      document.getElementById('opening-time').value =
        record ? record.opening_time.slice(0, 5) : settings.defaults.opening_time;
      document.getElementById('closing-time').value =
        record ? record.closing_time.slice(0, 5) : settings.defaults.closing_time;
      document.getElementById('special-note').value = record ? record.special_note : '';
      document.getElementById('is-enabled').checked = record ? record.is_enabled : true;
      document.getElementById('delete-date').style.display = record ? '' : 'none';
      document.getElementById('date-modal').classList.add('visible');
    };

    const closeModal = () => {
      document.getElementById('date-modal').classList.remove('visible');
    };

    document.getElementById('date-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const date = document.getElementById('date-value').value;
      try {
        const body = await api('/api/dates', {
          method: 'POST',
          body: JSON.stringify({
            date,
            opening_time: document.getElementById('opening-time').value,
            closing_time: document.getElementById('closing-time').value,
            special_note: document.getElementById('special-note').value,
            is_enabled: document.getElementById('is-enabled').checked
          })
        });
        allDates[date] = body.data;
        closeModal();
        renderCalendar();
      } catch (err) {
        alert('Failed to save: ' + err.message);
      }
    });

    document.getElementById('delete-date').addEventListener('click', async () => {
      const date = document.getElementById('date-value').value;
      if (!confirm('Delete the record for ' + date + '?')) {
        return;
      }
      try {
        await api('/api/dates/' + date, { method: 'DELETE' });
        delete allDates[date];
        closeModal();
        renderCalendar();
      } catch (err) {
        alert('Failed to delete: ' + err.message);
      }
    });

    document.getElementById('apply-range').addEventListener('click', async () => {
      const start = document.getElementById('range-start').value;
      const end = document.getElementById('range-end').value;
      const opening = document.getElementById('range-opening').value;
      const closing = document.getElementById('range-closing').value;
      if (!start || !end) {
        alert('Please select both start and end dates.');
        return;
      }
      if (!opening || !closing) {
        alert('Please enter both opening and closing times.');
        return;
      }
      if (new Date(start) > new Date(end)) {
        alert('Start date must be before or equal to end date.');
        return;
      }
      const dayCount =
        Math.round((new Date(end) - new Date(start)) / (1000 * 60 * 60 * 24)) + 1;
      if (!confirm('Apply these hours to ' + dayCount + ' date(s)?')) {
        return;
      }

      const button = document.getElementById('apply-range');
      button.disabled = true;
      try {
        const body = await api('/api/dates/range', {
          method: 'POST',
          body: JSON.stringify({
            start_date: start,
            end_date: end,
            opening_time: opening,
            closing_time: closing,
            special_note: document.getElementById('range-note').value,
            is_enabled: document.getElementById('range-enabled').checked
          })
        });
        const summary = body.data;
        if (summary.errors > 0) {
          alert('Completed with ' + summary.errors + ' error(s). ' +
            summary.saved + ' of ' + summary.total + ' date(s) were saved.');
        } else {
          alert('Successfully applied hours to ' + summary.total + ' date(s)!');
        }
        await loadDates();
      } catch (err) {
        alert('Failed to apply range: ' + err.message);
      } finally {
        button.disabled = false;
      }
    });

    document.getElementById('close-modal').addEventListener('click', closeModal);
    document.getElementById('date-modal').addEventListener('click', (event) => {
      if (event.target.id === 'date-modal') {
        closeModal();
      }
    });
    document.getElementById('prev-month').addEventListener('click', () => {
      current = new Date(current.getFullYear(), current.getMonth() - 1, 1);
      renderCalendar();
    });
    document.getElementById('next-month').addEventListener('click', () => {
      current = new Date(current.getFullYear(), current.getMonth() + 1, 1);
      renderCalendar();
    });

    renderHeaders();
    loadDates();
  </script>
</body>
</html>
"##;
