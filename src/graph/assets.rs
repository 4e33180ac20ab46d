/// Embedded web assets for the SBOM dashboard

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>sbomscope - Dependency Dashboard</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #1a1a2e;
            color: #eee;
            overflow: hidden;
        }

        #container {
            display: flex;
            height: 100vh;
        }

        #graph {
            flex: 1;
            background: #16213e;
            position: relative;
        }

        #sidebar {
            width: 340px;
            background: #1a1a2e;
            border-left: 1px solid #333;
            padding: 20px;
            overflow-y: auto;
        }

        h1 {
            font-size: 1.4em;
            margin-bottom: 10px;
            color: #00d9ff;
        }

        h2 {
            font-size: 1.1em;
            margin: 15px 0 10px;
            color: #888;
            text-transform: uppercase;
            letter-spacing: 1px;
        }

        select, input[type="text"] {
            width: 100%;
            padding: 8px;
            background: #16213e;
            color: #eee;
            border: 1px solid #333;
            border-radius: 6px;
            margin-bottom: 10px;
        }

        .controls label {
            display: flex;
            align-items: center;
            gap: 8px;
            font-size: 0.9em;
            padding: 6px 0;
        }

        input[type="range"] {
            flex: 1;
        }

        .stat {
            display: flex;
            justify-content: space-between;
            padding: 8px 0;
            border-bottom: 1px solid #333;
        }

        .stat-value {
            color: #00d9ff;
            font-weight: bold;
        }

        .stat-value.danger {
            color: #e74c3c;
        }

        #node-info {
            display: none;
            margin-top: 20px;
            padding: 15px;
            background: #16213e;
            border-radius: 8px;
        }

        #node-info.visible {
            display: block;
        }

        #node-info h3 {
            color: #00d9ff;
            margin-bottom: 10px;
            word-break: break-all;
        }

        .vuln-list {
            margin-top: 10px;
            font-size: 0.85em;
        }

        .vuln-list span {
            display: inline-block;
            background: #333;
            padding: 2px 8px;
            border-radius: 4px;
            margin: 2px;
        }

        #tree {
            margin-top: 10px;
            font-size: 0.85em;
            font-family: ui-monospace, monospace;
        }

        #tree ul {
            list-style: none;
            padding-left: 16px;
            border-left: 1px solid #333;
        }

        .legend {
            display: flex;
            flex-wrap: wrap;
            gap: 10px;
            margin-top: 15px;
        }

        .legend-item {
            display: flex;
            align-items: center;
            gap: 5px;
            font-size: 0.85em;
        }

        .legend-color {
            width: 14px;
            height: 14px;
            border-radius: 50%;
        }

        .node circle {
            fill: #1abc9c;
            stroke: #16213e;
            stroke-width: 1.5px;
            cursor: pointer;
        }

        .node.cve circle {
            fill: #f39c12;
        }

        .node.reachable circle {
            fill: #e74c3c;
        }

        .node.dimmed {
            opacity: 0.15;
        }

        .node.highlighted circle {
            stroke: #00d9ff;
            stroke-width: 3px;
        }

        .node text {
            fill: #ccc;
            pointer-events: none;
        }

        .link {
            stroke: #445;
            stroke-opacity: 0.6;
        }

        .link.highlighted {
            stroke: #00d9ff;
            stroke-opacity: 1;
        }

        .link.dimmed {
            stroke-opacity: 0.05;
        }

        #status {
            position: absolute;
            top: 12px;
            left: 12px;
            font-size: 0.85em;
            color: #888;
        }
    </style>
</head>
<body>
    <div id="container">
        <div id="graph">
            <div id="status"></div>
            <svg></svg>
        </div>
        <div id="sidebar">
            <h1>sbomscope</h1>

            <h2>Project</h2>
            <select id="project-select"></select>

            <h2>Filters</h2>
            <div class="controls">
                <input type="text" id="search" placeholder="Search packages...">
                <label>
                    <input type="checkbox" id="vulnerable-only">
                    Vulnerable only
                </label>
                <label>
                    Spacing
                    <input type="range" id="spacing" min="0" max="1000" step="50">
                </label>
                <label>
                    Font size
                    <input type="range" id="font-size" min="8" max="24" step="1">
                </label>
            </div>

            <h2>Summary</h2>
            <div class="stat"><span>Components</span><span class="stat-value" id="stat-components">-</span></div>
            <div class="stat"><span>Distinct CVEs</span><span class="stat-value" id="stat-cves">-</span></div>
            <div class="stat"><span>Reachable CVEs</span><span class="stat-value danger" id="stat-reachable">-</span></div>
            <div class="stat"><span>Licenses in use</span><span class="stat-value" id="stat-licenses">-</span></div>
            <div class="stat"><span>Total libraries</span><span class="stat-value" id="stat-libraries">-</span></div>
            <div class="stat"><span>Visible nodes</span><span class="stat-value" id="stat-visible">-</span></div>

            <div class="legend">
                <div class="legend-item"><div class="legend-color" style="background:#e74c3c"></div>Reachable</div>
                <div class="legend-item"><div class="legend-color" style="background:#f39c12"></div>Has CVEs</div>
                <div class="legend-item"><div class="legend-color" style="background:#1abc9c"></div>Clean</div>
            </div>

            <div id="node-info">
                <h3 id="node-name"></h3>
                <div class="stat"><span>Version</span><span class="stat-value" id="node-version">-</span></div>
                <div class="stat"><span>Depends on</span><span class="stat-value" id="node-downstream">-</span></div>
                <div class="stat"><span>Required by</span><span class="stat-value" id="node-upstream">-</span></div>
                <div class="vuln-list" id="node-vulns"></div>
                <h2>Dependency tree</h2>
                <div id="tree"></div>
            </div>
        </div>
    </div>

    <script>
        const svg = d3.select('#graph svg');
        const zoomLayer = svg.append('g');
        let currentProject = null;
        let prefs = { font_size: 14, node_spacing: 100, vulnerable_only: false };
        let searchTimer = null;
        let prefsTimer = null;

        svg.call(d3.zoom()
            .scaleExtent([0.05, 8])
            .on('zoom', (event) => zoomLayer.attr('transform', event.transform)));

        function resize() {
            const rect = document.getElementById('graph').getBoundingClientRect();
            svg.attr('width', rect.width).attr('height', rect.height);
        }
        window.addEventListener('resize', resize);
        resize();

        async function fetchJson(url, options) {
            const res = await fetch(url, options);
            if (!res.ok) throw new Error(await res.text());
            return res.json();
        }

        function graphUrl() {
            const params = new URLSearchParams();
            const q = document.getElementById('search').value;
            if (q) params.set('q', q);
            if (document.getElementById('vulnerable-only').checked) params.set('vulnerable', 'true');
            params.set('spacing', document.getElementById('spacing').value);
            return `/api/${encodeURIComponent(currentProject)}/graph?${params}`;
        }

        function status(text) {
            document.getElementById('status').textContent = text;
        }

        function render(data) {
            const anyHighlight = data.nodes.some(n => n.highlighted);

            zoomLayer.selectAll('*').remove();

            const byId = new Map(data.nodes.map(n => [n.id, n]));

            zoomLayer.selectAll('.link')
                .data(data.links.filter(l => byId.has(l.source) && byId.has(l.target)))
                .join('line')
                .attr('class', l => {
                    let cls = 'link';
                    if (l.highlighted) cls += ' highlighted';
                    else if (anyHighlight) cls += ' dimmed';
                    return cls;
                })
                .attr('x1', l => byId.get(l.source).x)
                .attr('y1', l => byId.get(l.source).y)
                .attr('x2', l => byId.get(l.target).x)
                .attr('y2', l => byId.get(l.target).y);

            const node = zoomLayer.selectAll('.node')
                .data(data.nodes)
                .join('g')
                .attr('class', n => {
                    let cls = 'node';
                    if (n.class) cls += ' ' + n.class;
                    if (n.highlighted) cls += ' highlighted';
                    else if (anyHighlight) cls += ' dimmed';
                    return cls;
                })
                .attr('transform', n => `translate(${n.x},${n.y})`)
                .on('click', (event, n) => selectNode(n));

            node.append('circle')
                .attr('r', n => 6 + Math.min(n.vulnerability_count * 2, 10));

            node.append('text')
                .attr('dx', 10)
                .attr('dy', 4)
                .style('font-size', prefs.font_size + 'px')
                .text(n => n.version ? `${n.label}@${n.version}` : n.label);

            document.getElementById('stat-visible').textContent =
                `${data.metadata.visible_nodes} / ${data.metadata.total_nodes}`;
            status(`${data.metadata.visible_nodes} nodes, ${data.metadata.visible_links} edges`);
        }

        async function loadGraph() {
            if (!currentProject) return;
            status('Loading graph...');
            try {
                render(await fetchJson(graphUrl()));
            } catch (e) {
                status('Error: ' + e.message);
            }
        }

        async function loadSummary() {
            try {
                const s = await fetchJson(`/api/${encodeURIComponent(currentProject)}/summary`);
                document.getElementById('stat-components').textContent = s.component_count;
                document.getElementById('stat-cves').textContent = s.rollup.total_unique_cves;
                document.getElementById('stat-reachable').textContent = s.rollup.reachable_unique_cves;
                document.getElementById('stat-licenses').textContent =
                    s.summary.license_sum['usedlicense'] ?? 0;
                document.getElementById('stat-libraries').textContent = s.package_check
                    ? Object.values(s.package_check.RiskLevelCounts).reduce((a, b) => a + b, 0)
                    : '-';
            } catch (e) {
                status('Error: ' + e.message);
            }
        }

        function renderTree(node) {
            const li = document.createElement('li');
            li.textContent = node.version ? `${node.label}@${node.version}` : node.label;
            if (node.children) {
                const ul = document.createElement('ul');
                for (const child of node.children) ul.appendChild(renderTree(child));
                li.appendChild(ul);
            }
            return li;
        }

        async function selectNode(n) {
            const base = `/api/${encodeURIComponent(currentProject)}`;
            const ref = encodeURIComponent(n.id);
            try {
                const closure = await fetchJson(`${base}/closure/${ref}`);
                const tree = await fetchJson(`${base}/tree/${ref}`);

                document.getElementById('node-info').classList.add('visible');
                document.getElementById('node-name').textContent =
                    n.version ? `${n.label}@${n.version}` : n.label;
                document.getElementById('node-version').textContent = n.version || '-';
                document.getElementById('node-downstream').textContent = closure.downstream.length;
                document.getElementById('node-upstream').textContent = closure.upstream.length;

                const vulns = document.getElementById('node-vulns');
                vulns.innerHTML = '';
                if (n.vulnerability_count > 0) {
                    const badge = document.createElement('span');
                    badge.textContent = `${n.vulnerability_count} vulnerabilit${n.vulnerability_count === 1 ? 'y' : 'ies'}`;
                    vulns.appendChild(badge);
                }

                const treeEl = document.getElementById('tree');
                treeEl.innerHTML = '';
                const ul = document.createElement('ul');
                ul.appendChild(renderTree(tree));
                treeEl.appendChild(ul);

                await loadGraph();
            } catch (e) {
                status('Error: ' + e.message);
            }
        }

        function schedulePrefsSave() {
            clearTimeout(prefsTimer);
            prefsTimer = setTimeout(() => {
                prefs.node_spacing = parseInt(document.getElementById('spacing').value, 10);
                prefs.font_size = parseInt(document.getElementById('font-size').value, 10);
                prefs.vulnerable_only = document.getElementById('vulnerable-only').checked;
                fetch('/api/prefs', {
                    method: 'PUT',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(prefs),
                }).catch(() => {});
            }, 500);
        }

        // Search is debounced; each keystroke tears down the pending request.
        document.getElementById('search').addEventListener('input', () => {
            clearTimeout(searchTimer);
            searchTimer = setTimeout(loadGraph, 300);
        });

        document.getElementById('vulnerable-only').addEventListener('change', () => {
            loadGraph();
            schedulePrefsSave();
        });

        document.getElementById('spacing').addEventListener('change', () => {
            loadGraph();
            schedulePrefsSave();
        });

        document.getElementById('font-size').addEventListener('input', () => {
            prefs.font_size = parseInt(document.getElementById('font-size').value, 10);
            zoomLayer.selectAll('.node text').style('font-size', prefs.font_size + 'px');
            schedulePrefsSave();
        });

        document.getElementById('project-select').addEventListener('change', (e) => {
            currentProject = e.target.value;
            document.getElementById('node-info').classList.remove('visible');
            loadGraph();
            loadSummary();
        });

        async function init() {
            try {
                prefs = await fetchJson('/api/prefs');
            } catch (e) { /* defaults */ }
            document.getElementById('spacing').value = prefs.node_spacing;
            document.getElementById('font-size').value = prefs.font_size;
            document.getElementById('vulnerable-only').checked = prefs.vulnerable_only;

            try {
                const groups = await fetchJson('/api/projects');
                const select = document.getElementById('project-select');
                for (const group of groups) {
                    const optgroup = document.createElement('optgroup');
                    optgroup.label = group.name;
                    for (const run of group.runs) {
                        const option = document.createElement('option');
                        option.value = run.id;
                        option.textContent = `${run.date} ${run.time}`;
                        optgroup.appendChild(option);
                    }
                    select.appendChild(optgroup);
                }
                if (select.options.length > 0) {
                    currentProject = select.options[0].value;
                    select.value = currentProject;
                    loadGraph();
                    loadSummary();
                }
            } catch (e) {
                status('Error: ' + e.message);
            }
        }

        init();
    </script>
</body>
</html>
"##;

/// Static export shell: the graph payload is inlined where the placeholder
/// sits, so the file works without a server.
pub const EXPORT_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>sbomscope - Dependency Graph Export</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #16213e;
            color: #eee;
            overflow: hidden;
        }

        #title {
            position: absolute;
            top: 12px;
            left: 12px;
            font-size: 0.9em;
            color: #888;
        }

        .node circle {
            fill: #1abc9c;
            stroke: #16213e;
            stroke-width: 1.5px;
        }

        .node.cve circle { fill: #f39c12; }
        .node.reachable circle { fill: #e74c3c; }
        .node text { fill: #ccc; font-size: 12px; }

        .link {
            stroke: #445;
            stroke-opacity: 0.6;
        }
    </style>
</head>
<body>
    <div id="title"></div>
    <svg></svg>
    <script>
        const data = /*__GRAPH_DATA__*/;

        const svg = d3.select('svg')
            .attr('width', window.innerWidth)
            .attr('height', window.innerHeight);
        const layer = svg.append('g');
        svg.call(d3.zoom()
            .scaleExtent([0.05, 8])
            .on('zoom', (event) => layer.attr('transform', event.transform)));

        document.getElementById('title').textContent =
            `${data.metadata.project}: ${data.metadata.visible_nodes} nodes, ${data.metadata.visible_links} edges`;

        const byId = new Map(data.nodes.map(n => [n.id, n]));

        layer.selectAll('.link')
            .data(data.links.filter(l => byId.has(l.source) && byId.has(l.target)))
            .join('line')
            .attr('class', 'link')
            .attr('x1', l => byId.get(l.source).x)
            .attr('y1', l => byId.get(l.source).y)
            .attr('x2', l => byId.get(l.target).x)
            .attr('y2', l => byId.get(l.target).y);

        const node = layer.selectAll('.node')
            .data(data.nodes)
            .join('g')
            .attr('class', n => n.class ? `node ${n.class}` : 'node')
            .attr('transform', n => `translate(${n.x},${n.y})`);

        node.append('circle')
            .attr('r', n => 6 + Math.min(n.vulnerability_count * 2, 10));

        node.append('text')
            .attr('dx', 10)
            .attr('dy', 4)
            .text(n => n.version ? `${n.label}@${n.version}` : n.label);
    </script>
</body>
</html>
"##;
