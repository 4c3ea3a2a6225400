pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Devotional</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .nav {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    .nav input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 999px;
      padding: 12px 16px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      background: var(--accent-2);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    button:disabled {
      opacity: 0.45;
      cursor: not-allowed;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 22px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .scriptures {
      color: var(--accent-2);
      font-weight: 500;
      margin: 0;
    }

    .message {
      margin: 0;
      line-height: 1.55;
      white-space: pre-line;
    }

    .checklist {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .checklist li.info {
      color: #6f6a65;
      font-style: italic;
    }

    .progress {
      display: grid;
      gap: 6px;
    }

    .progress-track {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      width: 0%;
      background: var(--accent);
      transition: width 250ms ease;
    }

    .btn-complete {
      background: var(--accent);
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-complete.ready {
      animation: pulse 900ms ease 2;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hidden {
      display: none;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @keyframes pulse {
      50% {
        transform: scale(1.06);
        box-shadow: 0 14px 32px rgba(255, 107, 74, 0.5);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Daily Devotional</h1>
      <p id="date" class="subtitle">{{DATE}}</p>
    </header>

    <section class="nav">
      <button id="prevBtn" type="button">&larr; Previous</button>
      <button id="nextBtn" type="button">Next &rarr;</button>
      <input id="jumpDate" type="date" value="{{DATE}}" />
      <button id="jumpBtn" type="button">Go</button>
    </section>

    <section class="card">
      <h2 id="title">Loading...</h2>
      <p id="scriptures" class="scriptures"></p>
      <p id="message" class="message"></p>
    </section>

    <section id="plan" class="card hidden">
      <h2>&#x2705; Daily Plan Checklist</h2>
      <div class="progress">
        <span class="progress-label">Progress: 0%</span>
        <div class="progress-track"><div class="progress-fill"></div></div>
      </div>
      <ul id="prayers" class="checklist"></ul>
    </section>

    <section class="nav">
      <button id="completeBtn" class="btn-complete" type="button" disabled>Mark complete</button>
      <div class="status" id="status"></div>
    </section>
  </main>

  <script>
    const dateEl = document.getElementById('date');
    const titleEl = document.getElementById('title');
    const scripturesEl = document.getElementById('scriptures');
    const messageEl = document.getElementById('message');
    const planEl = document.getElementById('plan');
    const prayersEl = document.getElementById('prayers');
    const progressLabel = document.querySelector('.progress-label');
    const progressFill = document.querySelector('.progress-fill');
    const completeBtn = document.getElementById('completeBtn');
    const statusEl = document.getElementById('status');
    const prevBtn = document.getElementById('prevBtn');
    const nextBtn = document.getElementById('nextBtn');
    const jumpDateInput = document.getElementById('jumpDate');
    const jumpBtn = document.getElementById('jumpBtn');

    let currentDate = '{{DATE}}';
    let loadSeq = 0;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const post = (url, body) =>
      fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });

    const renderProgress = (progress) => {
      progressLabel.textContent = `Progress: ${progress.percent}%`;
      progressFill.style.width = `${progress.percent}%`;
      completeBtn.disabled = !progress.can_complete;
      if (progress.completed) {
        setStatus('✅ Completed for this day!', 'ok');
      }
    };

    const cueReady = () => {
      completeBtn.classList.remove('ready');
      void completeBtn.offsetWidth;
      completeBtn.classList.add('ready');
      setStatus('All done! You can mark this day complete.', 'ok');
    };

    const renderChecklist = (progress) => {
      prayersEl.innerHTML = '';
      progress.checklist.forEach((item) => {
        const li = document.createElement('li');
        if (item.checked === null) {
          li.className = 'info';
          li.textContent = item.activity;
        } else {
          const label = document.createElement('label');
          const checkbox = document.createElement('input');
          checkbox.type = 'checkbox';
          checkbox.checked = item.checked;
          checkbox.addEventListener('change', () => toggleItem(item.index, checkbox));
          label.appendChild(checkbox);
          label.appendChild(document.createTextNode(` ${item.activity} – ${item.minutes} mins`));
          li.appendChild(label);
        }
        prayersEl.appendChild(li);
      });
    };

    const renderView = (view) => {
      currentDate = view.date;
      jumpDateInput.value = view.date;
      dateEl.textContent = view.display_date;
      setStatus('', '');
      completeBtn.classList.remove('ready');

      if (!view.devotional) {
        titleEl.textContent = 'No devotional found for this date.';
        scripturesEl.textContent = '';
        messageEl.textContent = '';
        prayersEl.innerHTML = '';
        planEl.classList.add('hidden');
        completeBtn.disabled = true;
        return;
      }

      titleEl.textContent = view.devotional.title;
      scripturesEl.textContent = '\u{1F4D6} ' + view.devotional.scriptures;
      messageEl.textContent = view.devotional.message;
      planEl.classList.remove('hidden');
      renderChecklist(view.progress);
      renderProgress(view.progress);
    };

    const showLoadError = () => {
      titleEl.textContent = 'Could not load daily devotional data.';
      scripturesEl.textContent = '';
      messageEl.textContent = '';
      planEl.classList.add('hidden');
      completeBtn.disabled = true;
    };

    const load = async (request) => {
      const seq = ++loadSeq;
      let res;
      try {
        res = await request();
      } catch (err) {
        if (seq === loadSeq) showLoadError();
        return;
      }
      if (seq !== loadSeq || res.status === 409) {
        return;
      }
      if (!res.ok) {
        showLoadError();
        return;
      }
      const view = await res.json();
      if (seq === loadSeq) {
        renderView(view);
      }
    };

    const toggleItem = async (index, checkbox) => {
      const date = currentDate;
      const res = await post('/api/checklist/toggle', { date, index });
      if (!res.ok) {
        checkbox.checked = !checkbox.checked;
        setStatus(await res.text(), 'error');
        return;
      }
      const data = await res.json();
      if (data.date !== currentDate) {
        return;
      }
      renderProgress(data.progress);
      if (data.entered_ready) {
        cueReady();
      }
    };

    const navigate = (action, date) => load(() => post('/api/navigate', { action, date }));

    prevBtn.addEventListener('click', () => navigate('prev'));
    nextBtn.addEventListener('click', () => navigate('next'));

    const jump = () => {
      const selected = jumpDateInput.value;
      if (!selected) return;
      navigate('jump', selected);
    };
    jumpBtn.addEventListener('click', jump);
    jumpDateInput.addEventListener('keydown', (event) => {
      if (event.key === 'Enter') {
        event.preventDefault();
        jump();
      }
    });

    completeBtn.addEventListener('click', async () => {
      completeBtn.disabled = true;
      const res = await post('/api/complete', { date: currentDate });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      const data = await res.json();
      if (data.date === currentDate) {
        renderProgress(data.progress);
      }
    });

    load(() => fetch(`/api/devotional?date=${encodeURIComponent(currentDate)}`));
  </script>
</body>
</html>
"#;
