//! Embedded stylesheet and static assets for the hosted pages.
//!
//! Compiled into the binary as string constants. The only external asset is
//! the Plotly bundle, loaded from its CDN on pages that plot charts.

/// Plotly bundle used by the chart containers.
pub const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Shared stylesheet for the dashboard and chatbot pages.
pub const STYLE: &str = r##"
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --purple: #bc8cff;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}
a { color: var(--accent); }

/* Layout */
.app {
  max-width: 1200px;
  margin: 0 auto;
  padding: 24px;
}

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}

header h1 {
  font-size: 24px;
  font-weight: 600;
  display: flex;
  align-items: center;
  gap: 10px;
}

header h1 .logo {
  color: var(--accent);
  font-family: var(--mono);
  font-weight: 700;
}

/* Navigation */
nav {
  display: flex;
  gap: 4px;
  margin-bottom: 24px;
  background: var(--surface);
  border-radius: var(--radius);
  padding: 4px;
  border: 1px solid var(--border);
}

nav form { flex: 1; }

nav .nav-link {
  width: 100%;
  padding: 8px 16px;
  border: none;
  border-radius: 6px;
  background: transparent;
  color: var(--text-muted);
  font-size: 13px;
  font-weight: 500;
  cursor: pointer;
}

nav .nav-link:hover { color: var(--text); background: rgba(255,255,255,0.04); }
nav .nav-link.active { background: var(--accent); color: #fff; }

.tab-content { display: none; }
.tab-content.active { display: block; }

/* Cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}

.card h2 {
  font-size: 16px;
  font-weight: 600;
  margin-bottom: 16px;
}

/* Filters */
.filters {
  display: flex;
  flex-wrap: wrap;
  gap: 24px;
  align-items: flex-start;
}

.filters .group { display: flex; flex-direction: column; gap: 4px; }
.filters label { color: var(--text-muted); cursor: pointer; }

button {
  padding: 8px 16px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  font-weight: 500;
  cursor: pointer;
}

button:disabled {
  background: var(--surface);
  color: var(--text-muted);
  cursor: default;
}

/* KPIs */
.kpis {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
}

.kpis > div {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  text-align: center;
  color: var(--text-muted);
}

.kpis p {
  font-size: 28px;
  font-weight: 700;
  font-family: var(--mono);
  color: var(--accent);
}

/* Charts */
.charts {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(420px, 1fr));
  gap: 16px;
}

.chart { min-height: 320px; }

/* Tables */
table {
  width: 100%;
  border-collapse: collapse;
  font-size: 13px;
}

th, td {
  text-align: left;
  padding: 8px 12px;
  border-bottom: 1px solid var(--border);
}

th {
  color: var(--text-muted);
  font-weight: 500;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

tr:hover { background: rgba(255,255,255,0.02); }

/* Chat */
.chat-messages {
  height: 360px;
  overflow-y: auto;
  display: flex;
  flex-direction: column;
  gap: 8px;
  margin-bottom: 12px;
}

.message {
  max-width: 75%;
  padding: 8px 12px;
  border-radius: 12px;
  white-space: pre-wrap;
}

.message.user-message { align-self: flex-end; background: var(--accent); color: #fff; }
.message.bot-message { align-self: flex-start; background: var(--bg); border: 1px solid var(--border); }

.chat-input { display: flex; gap: 8px; }
.chat-input input {
  flex: 1;
  padding: 8px 12px;
  border-radius: 6px;
  border: 1px solid var(--border);
  background: var(--bg);
  color: var(--text);
}

/* Recommendations */
.recommendation-item {
  border-bottom: 1px solid var(--border);
  padding: 12px 0;
}

.recommendation-item h4 { margin-bottom: 4px; }
.recommendation-item .details { color: var(--text-muted); font-size: 12px; }
.recommendation-item .summary { margin: 8px 0; }

.pagination {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 12px;
  margin-top: 12px;
}

#page-info { font-family: var(--mono); color: var(--text-muted); }
"##;
