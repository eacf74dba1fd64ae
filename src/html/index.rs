pub const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Coordinate Converter</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    :root {
      --bg: #0f172a;
      --panel: #1e293b;
      --accent: #38bdf8;
      --text: #e2e8f0;
      --muted: #94a3b8;
      --danger: #fb7185;
      --ok: #4ade80;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      font-family: ui-sans-serif, system-ui, sans-serif;
      background: var(--bg);
      color: var(--text);
      display: grid;
      grid-template-columns: 380px 1fr;
      height: 100vh;
    }

    aside {
      overflow-y: auto;
      padding: 1rem;
      background: var(--panel);
    }

    h1 { font-size: 1.2rem; margin: 0 0 1rem; }
    h2 { font-size: 1rem; margin: 1.2rem 0 0.5rem; color: var(--accent); }

    label { display: block; font-size: 0.8rem; color: var(--muted); margin-top: 0.5rem; }

    input, select, button {
      width: 100%;
      padding: 0.45rem;
      border-radius: 4px;
      border: 1px solid #334155;
      background: var(--bg);
      color: var(--text);
    }

    .row { display: grid; grid-template-columns: 2fr 1fr; gap: 0.5rem; }

    button {
      margin-top: 0.75rem;
      background: var(--accent);
      color: var(--bg);
      font-weight: 600;
      cursor: pointer;
    }

    .result {
      margin-top: 0.5rem;
      font-family: ui-monospace, monospace;
      font-size: 0.85rem;
      white-space: pre-wrap;
    }

    .result.error { color: var(--danger); }
    .result.ok { color: var(--ok); }

    #map { height: 100vh; }

    a { color: var(--accent); }
  </style>
</head>

<body>
  <aside>
    <h1>WGS 84 &harr; UTM Coordinate Converter</h1>

    <label for="epsg">Projected system</label>
    <select id="epsg">
      <option value="21037">EPSG:21037 Arc 1960 / UTM 37S</option>
      <option value="21036">EPSG:21036 Arc 1960 / UTM 36S</option>
      <option value="21035">EPSG:21035 Arc 1960 / UTM 35S</option>
      <option value="32737">EPSG:32737 WGS 84 / UTM 37S</option>
      <option value="32637">EPSG:32637 WGS 84 / UTM 37N</option>
      <option value="32736">EPSG:32736 WGS 84 / UTM 36S</option>
      <option value="32636">EPSG:32636 WGS 84 / UTM 36N</option>
    </select>

    <h2>Point: WGS 84 to UTM</h2>
    <form id="point-form">
      <div class="row">
        <div>
          <label for="lat">Latitude</label>
          <input id="lat" value="1°17'00&quot;S" required />
        </div>
        <div>
          <label for="lat-format">Format</label>
          <select id="lat-format">
            <option value="dd">DD</option>
            <option value="dm">DM</option>
            <option value="dms" selected>DMS</option>
          </select>
        </div>
      </div>
      <div class="row">
        <div>
          <label for="lon">Longitude</label>
          <input id="lon" value="36°49'00&quot;E" required />
        </div>
        <div>
          <label for="lon-format">Format</label>
          <select id="lon-format">
            <option value="dd">DD</option>
            <option value="dm">DM</option>
            <option value="dms" selected>DMS</option>
          </select>
        </div>
      </div>
      <button type="submit">Convert</button>
      <div id="point-result" class="result"></div>
    </form>

    <h2>Reverse: UTM to WGS 84</h2>
    <form id="reverse-form">
      <label for="easting">Easting (m)</label>
      <input id="easting" type="number" step="0.001" value="256959.123" required />
      <label for="northing">Northing (m)</label>
      <input id="northing" type="number" step="0.001" value="9858355.222" required />
      <button type="submit">Convert</button>
      <div id="reverse-result" class="result"></div>
    </form>

    <h2>Batch CSV</h2>
    <form id="batch-form">
      <label for="csv-file">CSV with latitude/longitude columns</label>
      <input id="csv-file" type="file" accept=".csv,text/csv" required />
      <button type="submit">Convert file</button>
      <div id="batch-result" class="result"></div>
    </form>
    <p><a href="/download-sample-csv">Download sample CSV</a></p>
  </aside>

  <div id="map"></div>

  <script>
    const map = L.map("map").setView([-1.2833, 36.8167], 7);
    L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
      maxZoom: 19,
      attribution: "&copy; OpenStreetMap contributors",
    }).addTo(map);
    const markers = L.layerGroup().addTo(map);

    const epsg = () => Number(document.querySelector("#epsg").value);

    function show(id, text, ok) {
      const el = document.querySelector(id);
      el.textContent = text;
      el.className = "result " + (ok ? "ok" : "error");
    }

    async function postJson(url, body) {
      const response = await fetch(url, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body),
      });
      const data = await response.json();
      if (!response.ok) {
        throw new Error(data.detail || response.statusText);
      }
      return data;
    }

    // Popup text comes from user input, so it is only ever set as text
    function popupContent(lines) {
      const el = document.createElement("div");
      lines.forEach((line, i) => {
        if (i > 0) {
          el.appendChild(document.createElement("br"));
        }
        el.appendChild(document.createTextNode(line));
      });
      return el;
    }

    function addMarker(lat, lon, lines) {
      markers.clearLayers();
      L.marker([lat, lon]).addTo(markers).bindPopup(popupContent(lines)).openPopup();
      map.setView([lat, lon], 12);
    }

    document.querySelector("#point-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      try {
        const data = await postJson("/convert/point", {
          latitude: document.querySelector("#lat").value,
          longitude: document.querySelector("#lon").value,
          lat_format: document.querySelector("#lat-format").value,
          lon_format: document.querySelector("#lon-format").value,
          target_epsg: epsg(),
        });
        show("#point-result",
          `EPSG:${data.epsg}\nEasting:  ${data.easting.toFixed(3)}\nNorthing: ${data.northing.toFixed(3)}`,
          true);
        addMarker(data.latitude, data.longitude, [
          `${data.input_lat}, ${data.input_lon}`,
          `E ${data.easting.toFixed(3)} N ${data.northing.toFixed(3)}`,
        ]);
      } catch (err) {
        show("#point-result", err.message, false);
      }
    });

    document.querySelector("#reverse-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      try {
        const data = await postJson("/convert/reverse", {
          easting: Number(document.querySelector("#easting").value),
          northing: Number(document.querySelector("#northing").value),
          source_epsg: epsg(),
        });
        show("#reverse-result",
          `Latitude:  ${data.latitude.toFixed(6)}  ${data.latitude_dms}\nLongitude: ${data.longitude.toFixed(6)}  ${data.longitude_dms}`,
          true);
        addMarker(data.latitude, data.longitude, [`${data.latitude_dms} ${data.longitude_dms}`]);
      } catch (err) {
        show("#reverse-result", err.message, false);
      }
    });

    document.querySelector("#batch-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      const file = document.querySelector("#csv-file").files[0];
      if (!file) {
        return;
      }
      const form = new FormData();
      form.append("file", file);
      try {
        const response = await fetch(`/convert/batch?target_epsg=${epsg()}`, {
          method: "POST",
          body: form,
        });
        if (!response.ok) {
          const data = await response.json();
          throw new Error(data.detail || response.statusText);
        }
        const blob = await response.blob();
        const link = document.createElement("a");
        link.href = URL.createObjectURL(blob);
        link.download = "converted_" + file.name;
        link.click();
        URL.revokeObjectURL(link.href);
        const total = response.headers.get("X-Record-Count");
        const ok = response.headers.get("X-Success-Count");
        show("#batch-result", `Converted ${ok} of ${total} rows`, true);
      } catch (err) {
        show("#batch-result", err.message, false);
      }
    });
  </script>
</body>

</html>
"##;
